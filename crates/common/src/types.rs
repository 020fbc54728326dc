//! Core types for SwiftTest

use serde::{Deserialize, Serialize};

/// Exclusive category of a test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Positive,
    Negative,
    Ui,
}

impl Bucket {
    /// All buckets in execution order
    pub const ALL: [Bucket; 3] = [Bucket::Positive, Bucket::Negative, Bucket::Ui];
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bucket::Positive => write!(f, "positive"),
            Bucket::Negative => write!(f, "negative"),
            Bucket::Ui => write!(f, "ui"),
        }
    }
}

impl std::str::FromStr for Bucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "positive" | "pos" => Ok(Bucket::Positive),
            "negative" | "neg" => Ok(Bucket::Negative),
            "ui" => Ok(Bucket::Ui),
            other => Err(format!("unknown bucket '{}' (expected positive, negative or ui)", other)),
        }
    }
}

/// Sub-fields decoded from the multi-line category cell
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub input_type: String,
    pub sentence_focus: String,
    pub quality_focus: String,
}

/// A normalized test case derived from one spreadsheet row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub id: String,
    pub name: String,
    pub length_type: String,
    pub input: String,
    pub expected_output: String,
    pub category: Category,

    /// Negative cases only; mirrors `expected_output`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_issue: Option<String>,

    /// UI cases only; mirrors `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// All normalized test cases, grouped by bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSuite {
    #[serde(default)]
    pub positive_tests: Vec<TestCase>,
    #[serde(default)]
    pub negative_tests: Vec<TestCase>,
    #[serde(default)]
    pub ui_tests: Vec<TestCase>,
}

impl TestSuite {
    /// Cases in one bucket
    pub fn bucket(&self, bucket: Bucket) -> &[TestCase] {
        match bucket {
            Bucket::Positive => &self.positive_tests,
            Bucket::Negative => &self.negative_tests,
            Bucket::Ui => &self.ui_tests,
        }
    }

    pub fn push(&mut self, bucket: Bucket, case: TestCase) {
        match bucket {
            Bucket::Positive => self.positive_tests.push(case),
            Bucket::Negative => self.negative_tests.push(case),
            Bucket::Ui => self.ui_tests.push(case),
        }
    }

    /// Every case with its bucket, in bucket order then sheet order
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &TestCase)> {
        Bucket::ALL
            .into_iter()
            .flat_map(move |b| self.bucket(b).iter().map(move |c| (b, c)))
    }

    pub fn len(&self) -> usize {
        self.positive_tests.len() + self.negative_tests.len() + self.ui_tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
