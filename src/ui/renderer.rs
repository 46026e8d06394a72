//! Text rendering of the session view model.
//!
//! The renderer is a pure function from [`SessionViewModel`] to a string, so
//! the front-end decides where the frame goes and tests can compare output.
//!
//! # Layout
//!
//! ```text
//!  Results for "cats" (30)              ← header
//! sort: popularity  layout: 2 col       ← subtitle
//! > cats                                ← search bar
//! Searching...                          ← status (when loading / failed)
//! [0] Grey cat - Ana     [1] Kitten - Bo ← rows, `columns` per line
//! :open N  :more ...                    ← footer
//! ```

use crate::domain::PhotoDetail;
use crate::ui::style::Style;
use crate::ui::viewmodel::{RowItem, RowOrigin, SessionViewModel, StatusKind};
use std::fmt::Write as _;

/// Renders one frame for a terminal `width` columns wide.
#[must_use]
pub fn render(vm: &SessionViewModel, style: Style, width: usize) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", style.bold(&vm.header.title));
    let _ = writeln!(out, "{}", style.dim(&vm.header.subtitle));
    let _ = writeln!(out, "> {}", vm.search_bar.query);

    if let Some(status) = &vm.status {
        let line = match status.kind {
            StatusKind::Loading => style.accent(&status.message),
            StatusKind::Error => style.error(&format!("Error: {}", status.message)),
        };
        let _ = writeln!(out, "{line}");
    }

    if let Some(empty) = &vm.empty_state {
        let _ = writeln!(out, "{}", style.bold(&empty.message));
        let _ = writeln!(out, "{}", style.dim(&empty.subtitle));
    }

    render_rows(&mut out, &vm.rows, vm.columns.max(1), width, style);

    let _ = write!(out, "{}", style.dim(&vm.footer.keybindings));
    out
}

fn render_rows(out: &mut String, rows: &[RowItem], columns: usize, width: usize, style: Style) {
    let cell_width = (width / columns).max(16);

    for line in rows.chunks(columns) {
        let cells: Vec<String> = line.iter().map(|row| format_cell(row, cell_width)).collect();
        let last = cells.len().saturating_sub(1);
        for (i, cell) in cells.iter().enumerate() {
            let origin = line[i].origin;
            let text = if i == last {
                cell.trim_end().to_string()
            } else {
                cell.clone()
            };
            let painted = match origin {
                RowOrigin::History => style.dim(&text),
                RowOrigin::Result => text,
            };
            out.push_str(&painted);
        }
        out.push('\n');
    }
}

/// Fixed-width cell, padded or cut on character boundaries.
fn format_cell(row: &RowItem, cell_width: usize) -> String {
    let marker = match row.origin {
        RowOrigin::History => "*",
        RowOrigin::Result => " ",
    };
    let text = format!("[{}]{marker}{} - {}", row.index, row.title, row.author);
    let inner = cell_width.saturating_sub(1);
    let count = text.chars().count();

    if count > inner {
        let cut: String = text.chars().take(inner).collect();
        format!("{cut} ")
    } else {
        format!("{text}{}", " ".repeat(cell_width - count))
    }
}

/// Renders the detail view for a selected photo.
#[must_use]
pub fn render_detail(detail: &PhotoDetail, style: Style) -> String {
    let mut out = String::new();
    let title = detail.description.as_deref().unwrap_or("(untitled)");
    let _ = writeln!(out, "{}", style.bold(title));
    let _ = writeln!(out, "by {}", detail.author_name);
    match &detail.image_url {
        Some(url) => {
            let _ = write!(out, "{}", style.accent(url));
        }
        None => {
            let _ = write!(out, "{}", style.dim("(fetching full image...)"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Photo;
    use crate::ui::viewmodel::{FooterInfo, HeaderInfo, SearchBarInfo, StatusLine};

    fn vm(rows: Vec<RowItem>, columns: usize) -> SessionViewModel {
        SessionViewModel {
            header: HeaderInfo {
                title: "Results".to_string(),
                subtitle: "sort: date".to_string(),
            },
            search_bar: SearchBarInfo {
                query: "cats".to_string(),
            },
            status: None,
            rows,
            columns,
            empty_state: None,
            footer: FooterInfo {
                keybindings: ":quit".to_string(),
            },
        }
    }

    fn row(index: usize, origin: RowOrigin, description: &str) -> RowItem {
        RowItem::new(index, origin, &Photo::new(format!("p{index}"), Some(description), "Ana"))
    }

    #[test]
    fn two_column_layout_pairs_rows() {
        let rows = vec![
            row(0, RowOrigin::History, "Old cat"),
            row(1, RowOrigin::Result, "Grey cat"),
            row(2, RowOrigin::Result, "Kitten"),
        ];
        let out = render(&vm(rows, 2), Style::plain(), 60);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[2], "> cats");
        assert!(lines[3].starts_with("[0]*Old cat - Ana"));
        assert!(lines[3].contains("[1] Grey cat - Ana"));
        assert_eq!(lines[4], "[2] Kitten - Ana");
        assert_eq!(lines[5], ":quit");
    }

    #[test]
    fn one_column_layout_lists_each_row() {
        let rows = vec![row(0, RowOrigin::Result, "A"), row(1, RowOrigin::Result, "B")];
        let out = render(&vm(rows, 1), Style::plain(), 40);
        assert!(out.contains("[0] A - Ana\n[1] B - Ana\n"));
    }

    #[test]
    fn error_status_is_shown() {
        let mut model = vm(vec![], 2);
        model.status = Some(StatusLine::error("rate limited"));
        let out = render(&model, Style::plain(), 40);
        assert!(out.contains("Error: rate limited"));
    }

    #[test]
    fn detail_without_image_says_so() {
        let detail = Photo::new("x", Some("Fox"), "Ana").detail();
        let out = render_detail(&detail, Style::plain());
        assert_eq!(out, "Fox\nby Ana\n(fetching full image...)");
    }
}
