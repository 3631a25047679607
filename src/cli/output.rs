//! Output formatting helpers for CLI

use crate::q_learning::QTable;

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print every stored state with its action values and greedy choice
pub fn print_q_table(table: &QTable) {
    println!("  {:12} {:>10} {:>10}  greedy", "state", "C", "D");
    for (state, values) in table.iter() {
        println!(
            "  {:12} {:>10.3} {:>10.3}  {}",
            state.to_string(),
            values.cooperate,
            values.defect,
            values.greedy()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(5000), "5,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }
}
