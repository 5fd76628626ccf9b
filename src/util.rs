/// Short label drawn inside a node: the cleaned first letter of every word
/// longer than three characters, shorter words kept whole.
pub fn initials(title: &str) -> String {
    title
        .split(' ')
        .map(|part| {
            if part.chars().count() > 3 {
                part.chars()
                    .next()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .map(|c| c.to_ascii_uppercase().to_string())
                    .unwrap_or_default()
            } else {
                part.to_owned()
            }
        })
        .collect()
}

pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_owned();
    }
    let mut truncated: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_of_titles() {
        assert_eq!(initials("Charles Babbage"), "CB");
        assert_eq!(initials("Ada of Lovelace"), "AdaofL");
        assert_eq!(initials("Alan Mathison Turing"), "AMT");
        assert_eq!(initials("(Analytical) Engine"), "E");
        assert_eq!(initials("IBM"), "IBM");
    }

    #[test]
    fn truncates_long_labels() {
        assert_eq!(truncate_label("short", 10), "short");
        assert_eq!(truncate_label("Difference Engine", 8), "Differe…");
    }
}
