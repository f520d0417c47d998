use super::render::{format_body, FormattedLine};

fn sectioned(header: &str, content: &str) -> FormattedLine {
    FormattedLine::Sectioned {
        header: header.to_string(),
        content: content.to_string(),
    }
}

fn plain(text: &str) -> FormattedLine {
    FormattedLine::Plain(text.to_string())
}

#[test]
fn test_section_lines_are_split_at_the_dash() {
    let body = "C – Kontext: Newsletter für Bestandskunden\nL – Länge: 100 Wörter";

    let lines: Vec<_> = format_body(body).collect();

    assert_eq!(lines, vec![
        sectioned("C – ", "Kontext: Newsletter für Bestandskunden"),
        sectioned("L – ", "Länge: 100 Wörter"),
    ]);
}

#[test]
fn test_multi_letter_headers_are_supported() {
    let lines: Vec<_> = format_body("TC – kombiniertes Element").collect();

    assert_eq!(lines, vec![sectioned("TC – ", "kombiniertes Element")]);
}

#[test]
fn test_non_section_lines_stay_plain() {
    let lines: Vec<_> = format_body("Hier ist Ihr Prompt.").collect();

    assert_eq!(lines, vec![plain("Hier ist Ihr Prompt.")]);
}

#[test]
fn test_blank_lines_produce_nothing() {
    let body = "T – Task: Bericht\n\n   \nC – Context: Quartalszahlen";

    let lines: Vec<_> = format_body(body).collect();

    assert_eq!(lines.len(), 2);
}

#[test]
fn test_mid_line_pattern_never_splits() {
    let body = "Das Element T – Task beschreibt die Aufgabe";

    let lines: Vec<_> = format_body(body).collect();

    assert_eq!(lines, vec![plain("Das Element T – Task beschreibt die Aufgabe")]);
}

#[test]
fn test_lowercase_prefix_stays_plain() {
    let lines: Vec<_> = format_body("z – kein Header").collect();

    assert_eq!(lines, vec![plain("z – kein Header")]);
}

#[test]
fn test_hyphen_instead_of_dash_stays_plain() {
    // ASCII hyphen is not the en dash the convention uses
    let lines: Vec<_> = format_body("T - Task: Bericht").collect();

    assert_eq!(lines, vec![plain("T - Task: Bericht")]);
}

#[test]
fn test_lines_are_trimmed_and_order_is_preserved() {
    let body = "  Einleitung  \n  T – Task: eins  \n  Abschluss  ";

    let lines: Vec<_> = format_body(body).collect();

    assert_eq!(lines, vec![
        plain("Einleitung"),
        sectioned("T – ", "Task: eins"),
        plain("Abschluss"),
    ]);
}

#[test]
fn test_header_dash_without_trailing_content_stays_plain() {
    // Trimming strips the trailing space the pattern requires
    let lines: Vec<_> = format_body("E – ").collect();

    assert_eq!(lines, vec![plain("E –")]);
}
