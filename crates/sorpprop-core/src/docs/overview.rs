use super::latex::{escape, escape_percent};
use crate::core::database::{Entry, EntryKind};
use std::fmt::Write;

const TABLE_START: &str = "\\begin{tabular}[l]{|lp{11.5cm}|}\n\\hline\n\\addlinespace\n\n";
const TABLE_END: &str = "\\addlinespace\n\\hline\n\\end{tabular}\n\\newline\n\n";

/// Renders the overview table of equation set `index` of `family`.
///
/// Working pairs list sorbent, subtype and refrigerant; refrigerant entries
/// list the refrigerant name only. IDs are 1-based.
pub fn render(entry: &Entry, family: &str, index: usize) -> String {
    let set = entry.equation(family, index);
    let reference = set.map(|s| escape(&s.citation)).unwrap_or_default();
    let comment = match set.map(|s| s.comment.as_str()) {
        Some(text) if !text.is_empty() => escape(text),
        _ => "None".to_string(),
    };

    let mut rows: Vec<(&str, String)> = match entry.kind() {
        EntryKind::Refrigerant => vec![("Name", entry.key.refrigerant.clone())],
        EntryKind::Adsorption | EntryKind::Absorption => vec![
            ("Sorbent", entry.key.sorbent.clone()),
            ("Subtype", escape_percent(&entry.key.subtype)),
            ("Refrigerant", entry.key.refrigerant.clone()),
        ],
    };
    rows.push(("Equation", escape(family)));
    rows.push(("ID", (index + 1).to_string()));
    rows.push(("Reference", reference));
    rows.push(("Comment", comment));

    let mut out = String::from(TABLE_START);
    for (label, value) in &rows {
        let _ = writeln!(out, "\\textbf{{{}:}} & {} \\\\", label, value);
    }
    out.push('\n');
    out.push_str(TABLE_END);
    out
}
