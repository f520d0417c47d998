use promptforge_core::composer::GeneratedPrompt;
use promptforge_core::render::{format_body, FormattedLine};

// Bold blue headers, mirroring the section title styling of the result view
const HEADER: &str = "\x1b[1;34m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Echo of the submitted task above its result
pub fn render_task_echo(task: &str) -> String {
    format!("{}> {}{}", DIM, task, RESET)
}

pub fn render_error(message: &str) -> String {
    format!("{}{}{}", RED, message, RESET)
}

/// ANSI rendering of one generated prompt: justification block first,
/// then the body line by line
pub fn render_result(result: &GeneratedPrompt) -> String {
    let mut out = String::new();

    if !result.justification.is_empty() {
        out.push_str(&format!("{}Framework-Wahl{} {}\n", HEADER, RESET, result.justification));
        out.push('\n');
    }

    for line in format_body(&result.body) {
        match line {
            FormattedLine::Sectioned { header, content } => {
                out.push_str(&format!("{}{}{}\n", HEADER, header, RESET));
                out.push_str(&format!(" {}\n", content));
            }
            FormattedLine::Plain(text) => {
                out.push_str(&text);
                out.push('\n');
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_rendering_contains_justification_and_headers() {
        let result = GeneratedPrompt {
            raw: String::new(),
            justification: "CLEAR passt, da die Aufgabe einfach ist.".to_string(),
            body: "C – Kontext: Newsletter\nL – Länge: 100 Wörter".to_string(),
        };

        let rendered = render_result(&result);

        assert!(rendered.contains("Framework-Wahl"));
        assert!(rendered.contains("CLEAR passt, da die Aufgabe einfach ist."));
        assert!(rendered.contains("C – "));
        assert!(rendered.contains(" Kontext: Newsletter"));
        assert!(rendered.contains("L – "));
    }

    #[test]
    fn test_result_without_justification_skips_the_block() {
        let result = GeneratedPrompt {
            raw: String::new(),
            justification: String::new(),
            body: "Hier ist Ihr Prompt.".to_string(),
        };

        let rendered = render_result(&result);

        assert!(!rendered.contains("Framework-Wahl"));
        assert!(rendered.contains("Hier ist Ihr Prompt."));
    }
}
