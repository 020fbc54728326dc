//! Output formatting for CLI

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
    /// Plain text format
    Plain,
}

/// Trait for items that can be displayed in a table
pub trait TableDisplay {
    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;
}

/// Render a list of items
pub fn render_list<T: Serialize + TableDisplay>(items: &[T], format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                return "No items found.".to_string();
            }

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic);

            table.set_header(T::headers());
            for item in items {
                table.add_row(item.row());
            }

            table.to_string()
        }
        OutputFormat::Json => serde_json::to_string_pretty(items).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(items).unwrap_or_default(),
        OutputFormat::Plain => {
            let mut out = Vec::new();
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push("---".to_string());
                }
                for (header, value) in T::headers().iter().zip(item.row()) {
                    out.push(format!("{}: {}", header, value));
                }
            }
            out.join("\n")
        }
    }
}

/// Print a list of items
pub fn print_list<T: Serialize + TableDisplay>(items: &[T], format: OutputFormat) {
    println!("{}", render_list(items, format));
}

/// Print success message
pub fn print_success(message: &str) {
    println!("✅ {}", message);
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("❌ {}", message);
}

/// Print warning message
pub fn print_warning(message: &str) {
    println!("⚠️  {}", message);
}

/// Print info message
pub fn print_info(message: &str) {
    println!("ℹ️  {}", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Item {
        id: String,
        name: String,
    }

    impl TableDisplay for Item {
        fn headers() -> Vec<&'static str> {
            vec!["ID", "Name"]
        }

        fn row(&self) -> Vec<String> {
            vec![self.id.clone(), self.name.clone()]
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item { id: "Pos_Fun_0001".into(), name: "Greeting".into() },
            Item { id: "Neg_Fun_0001".into(), name: "Joined words".into() },
        ]
    }

    #[test]
    fn test_plain_output() {
        assert_eq!(
            render_list(&items(), OutputFormat::Plain),
            "ID: Pos_Fun_0001\nName: Greeting\n---\nID: Neg_Fun_0001\nName: Joined words"
        );
    }

    #[test]
    fn test_table_output_contains_rows() {
        let table = render_list(&items(), OutputFormat::Table);
        assert!(table.contains("Pos_Fun_0001"));
        assert!(table.contains("Joined words"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(render_list::<Item>(&[], OutputFormat::Table), "No items found.");
        assert_eq!(render_list::<Item>(&[], OutputFormat::Json), "[]");
    }
}
