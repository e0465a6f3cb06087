//! Item cards for the list and grid layouts.
//!
//! Cards are rendered to a vector of lines of exactly the requested width.
//! The number of lines *is* the card's measured height: the views feed it
//! straight into their virtualizer. Every piece is wrapped and padded as
//! plain text first and styled afterwards, so ANSI sequences never disturb
//! width calculations.

use crate::data::Item;
use crate::text;
use lipgloss_extras::prelude::*;

const BADGE_WIDTH: usize = 7;
const BADGE_HEIGHT: usize = 3;
const BANNER_HEIGHT: usize = 3;
const MIN_BADGE_CONTENT: usize = 24;
/// Border, padding and four text columns.
const MIN_FRAMED_WIDTH: usize = 8;

/// Collapsed description line limit in list cards.
pub const LIST_DESCRIPTION_LINES: usize = 2;
/// Collapsed description line limit in grid cards.
pub const GRID_DESCRIPTION_LINES: usize = 3;
/// Detail sentences shown by an expanded list card.
pub const LIST_DETAIL_SENTENCES: usize = 3;
/// Detail sentences shown by an expanded grid card.
pub const GRID_DETAIL_SENTENCES: usize = 2;

const DETAILS_HEADING: &str = "Additional Details";
const CHEVRON_DOWN: &str = "▾";
const CHEVRON_UP: &str = "▴";

/// Interaction state of one card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardState {
    /// Keyboard cursor is on this card.
    pub selected: bool,
    /// Card shows its full description and details.
    pub expanded: bool,
}

/// Styles shared by list and grid cards.
#[derive(Debug, Clone)]
pub struct CardStyles {
    /// Border of an idle card.
    pub border: Style,
    /// Border of the card under the cursor.
    pub border_selected: Style,
    /// Border of an expanded card not under the cursor.
    pub border_expanded: Style,
    /// Title text.
    pub title: Style,
    /// Description text.
    pub description: Style,
    /// Expand/collapse marker.
    pub chevron: Style,
    /// Rule above the details section.
    pub rule: Style,
    /// "Additional Details" heading.
    pub details_heading: Style,
    /// Details paragraph.
    pub details: Style,
}

impl Default for CardStyles {
    fn default() -> Self {
        Self {
            border: Style::new().foreground(AdaptiveColor {
                Light: "#E2E8F0",
                Dark: "#475569",
            }),
            border_selected: Style::new().foreground(Color::from("#3B82F6")),
            border_expanded: Style::new().foreground(AdaptiveColor {
                Light: "#BFDBFE",
                Dark: "#1E40AF",
            }),
            title: Style::new().bold(true).foreground(AdaptiveColor {
                Light: "#1E293B",
                Dark: "#F1F5F9",
            }),
            description: Style::new().foreground(AdaptiveColor {
                Light: "#475569",
                Dark: "#CBD5E1",
            }),
            chevron: Style::new().foreground(Color::from("#94A3B8")),
            rule: Style::new().foreground(AdaptiveColor {
                Light: "#F1F5F9",
                Dark: "#334155",
            }),
            details_heading: Style::new().bold(true).foreground(AdaptiveColor {
                Light: "#334155",
                Dark: "#E2E8F0",
            }),
            details: Style::new().foreground(AdaptiveColor {
                Light: "#475569",
                Dark: "#CBD5E1",
            }),
        }
    }
}

/// Text block inside a card, kept plain until the final styling pass.
enum Piece {
    Title(String),
    Description(String),
    Rule(usize),
    Heading(String),
    Details(String),
    Blank(usize),
}

impl Piece {
    fn render(&self, styles: &CardStyles, cols: usize) -> String {
        match self {
            Piece::Title(s) => {
                // The chevron occupies the last column.
                let split = s.len() - s.chars().last().map_or(0, char::len_utf8);
                let (title, chevron) = s.split_at(split);
                format!(
                    "{}{}",
                    styles.title.clone().inline(true).render(&text::pad_right(title, cols - 1)),
                    styles.chevron.clone().inline(true).render(chevron)
                )
            }
            Piece::Description(s) => styles
                .description
                .clone()
                .inline(true)
                .render(&text::pad_right(s, cols)),
            Piece::Rule(w) => format!(
                "{}{}",
                styles.rule.clone().inline(true).render(&"─".repeat(*w)),
                " ".repeat(cols.saturating_sub(*w))
            ),
            Piece::Heading(s) => styles
                .details_heading
                .clone()
                .inline(true)
                .render(&text::pad_right(s, cols)),
            Piece::Details(s) => styles
                .details
                .clone()
                .inline(true)
                .render(&text::pad_right(s, cols)),
            Piece::Blank(w) => " ".repeat(*w),
        }
    }
}

fn text_pieces(
    item: &Item,
    state: CardState,
    details: Option<&str>,
    cols: usize,
    collapsed_lines: usize,
) -> Vec<Piece> {
    let chevron = if state.expanded {
        CHEVRON_UP
    } else {
        CHEVRON_DOWN
    };
    let title_cols = cols.saturating_sub(2);
    let mut pieces = vec![Piece::Title(format!(
        "{}{}{}",
        text::pad_right(&text::truncate(&item.title, title_cols), title_cols),
        " ",
        chevron
    ))];

    let description = if state.expanded {
        text::wrap(&item.description, cols)
    } else {
        text::clamp_lines(&item.description, cols, collapsed_lines)
    };
    pieces.extend(description.into_iter().map(Piece::Description));

    if state.expanded {
        pieces.push(Piece::Rule(cols));
        pieces.push(Piece::Heading(DETAILS_HEADING.to_string()));
        if let Some(details) = details {
            pieces.extend(text::wrap(details, cols).into_iter().map(Piece::Details));
        }
    }
    pieces
}

fn border_for(state: CardState, styles: &CardStyles) -> &Style {
    if state.selected {
        &styles.border_selected
    } else if state.expanded {
        &styles.border_expanded
    } else {
        &styles.border
    }
}

/// Draws a rounded border with one column of padding around `lines`, each
/// of which must be `inner` columns wide.
pub fn frame(lines: Vec<String>, inner: usize, border: &Style) -> Vec<String> {
    let edge = |s: &str| border.clone().inline(true).render(s);
    let horizontal = "─".repeat(inner + 2);

    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(edge(&format!("╭{}╮", horizontal)));
    for line in lines {
        out.push(format!("{} {} {}", edge("│"), line, edge("│")));
    }
    out.push(edge(&format!("╰{}╯", horizontal)));
    out
}

/// A single title line for widths too small to frame.
fn compact(item: &Item, width: usize, styles: &CardStyles) -> Vec<String> {
    vec![styles
        .title
        .clone()
        .inline(true)
        .render(&text::pad_right(&item.title, width))]
}

fn badge_lines(item: &Item, width: usize, height: usize) -> Vec<String> {
    let style = Style::new()
        .background(Color::from(item.color))
        .foreground(Color::from("#FFFFFF"))
        .bold(true);
    let label = text::truncate(&item.id.to_string(), width);
    let pad = width - text::width(&label);
    let centered = format!(
        "{}{}{}",
        " ".repeat(pad / 2),
        label,
        " ".repeat(pad - pad / 2)
    );
    (0..height)
        .map(|row| {
            let body = if row == height / 2 {
                centered.clone()
            } else {
                " ".repeat(width)
            };
            style.clone().inline(true).render(&body)
        })
        .collect()
}

/// Renders a list card: id badge on the left, text on the right.
///
/// Collapsed cards clamp the description to two lines; expanded cards show
/// it in full followed by the details paragraph.
pub fn render_list_card(
    item: &Item,
    state: CardState,
    details: Option<&str>,
    width: usize,
    styles: &CardStyles,
) -> Vec<String> {
    if width < MIN_FRAMED_WIDTH {
        return compact(item, width, styles);
    }
    let inner = width - 4;
    let with_badge = inner >= MIN_BADGE_CONTENT;
    let text_cols = if with_badge {
        inner - BADGE_WIDTH - 2
    } else {
        inner
    };

    let pieces = text_pieces(item, state, details, text_cols, LIST_DESCRIPTION_LINES);
    let rows = if with_badge {
        pieces.len().max(BADGE_HEIGHT)
    } else {
        pieces.len()
    };
    let badge = if with_badge {
        badge_lines(item, BADGE_WIDTH, BADGE_HEIGHT)
    } else {
        Vec::new()
    };

    let mut lines = Vec::with_capacity(rows);
    for row in 0..rows {
        let right = pieces
            .get(row)
            .map(|p| p.render(styles, text_cols))
            .unwrap_or_else(|| Piece::Blank(text_cols).render(styles, text_cols));
        if with_badge {
            let left = badge
                .get(row)
                .cloned()
                .unwrap_or_else(|| " ".repeat(BADGE_WIDTH));
            lines.push(format!("{}  {}", left, right));
        } else {
            lines.push(right);
        }
    }
    frame(lines, inner, border_for(state, styles))
}

/// Renders a grid card: colored banner with the id on top, text below.
///
/// Collapsed cards clamp the description to three lines.
pub fn render_grid_card(
    item: &Item,
    state: CardState,
    details: Option<&str>,
    width: usize,
    styles: &CardStyles,
) -> Vec<String> {
    if width < MIN_FRAMED_WIDTH {
        return compact(item, width, styles);
    }
    let inner = width - 4;
    let mut lines = badge_lines(item, inner, BANNER_HEIGHT);
    lines.extend(
        text_pieces(item, state, details, inner, GRID_DESCRIPTION_LINES)
            .iter()
            .map(|p| p.render(styles, inner)),
    );
    frame(lines, inner, border_for(state, styles))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> Item {
        Item {
            id: 42,
            title: "Professional Technology Collection".to_string(),
            description: "Pellentesque sit amet hendrerit risus, sed porttitor quam. Interdum et malesuada fames ac ante ipsum primis in faucibus. Nulla facilisi.".to_string(),
            image: String::new(),
            color: "#3B82F6",
        }
    }

    fn plain(lines: &[String]) -> Vec<String> {
        lines.iter().map(strip_ansi_escapes::strip_str).collect()
    }

    fn assert_width(lines: &[String], width: usize) {
        for line in plain(lines) {
            assert_eq!(text::width(&line), width, "{line:?}");
        }
    }

    #[test]
    fn test_list_card_collapsed_shape() {
        let styles = CardStyles::default();
        let lines = render_list_card(&item(), CardState::default(), None, 50, &styles);
        assert_width(&lines, 50);
        // border + title + 2 clamped description lines + border
        assert_eq!(lines.len(), 5);
        let text = plain(&lines).join("\n");
        assert!(text.contains("42"));
        assert!(text.contains(CHEVRON_DOWN));
        assert!(!text.contains(DETAILS_HEADING));
    }

    #[test]
    fn test_list_card_expanded_is_taller() {
        let styles = CardStyles::default();
        let collapsed = render_list_card(&item(), CardState::default(), None, 50, &styles);
        let state = CardState {
            selected: true,
            expanded: true,
        };
        let expanded = render_list_card(&item(), state, Some("Ut viverra, eros in venenatis hendrerit."), 50, &styles);
        assert_width(&expanded, 50);
        assert!(expanded.len() > collapsed.len());
        let text = plain(&expanded).join("\n");
        assert!(text.contains(DETAILS_HEADING));
        assert!(text.contains("viverra"));
        assert!(text.contains(CHEVRON_UP));
    }

    #[test]
    fn test_narrow_list_card_drops_badge() {
        let styles = CardStyles::default();
        let lines = render_list_card(&item(), CardState::default(), None, 20, &styles);
        assert_width(&lines, 20);
        assert!(!plain(&lines)[1].contains("42"));
    }

    #[test]
    fn test_grid_card_shape() {
        let styles = CardStyles::default();
        let lines = render_grid_card(&item(), CardState::default(), None, 30, &styles);
        assert_width(&lines, 30);
        // border + banner + title + up to 3 description lines + border
        assert!(lines.len() <= 2 + BANNER_HEIGHT + 1 + GRID_DESCRIPTION_LINES);
        assert!(plain(&lines)[2].contains("42"));
    }

    #[test]
    fn test_cards_never_exceed_tiny_widths() {
        let styles = CardStyles::default();
        for width in [0, 1, 6, 7] {
            for lines in [
                render_list_card(&item(), CardState::default(), None, width, &styles),
                render_grid_card(&item(), CardState::default(), None, width, &styles),
            ] {
                assert_eq!(lines.len(), 1);
                assert_width(&lines, width);
            }
        }
        let framed = render_grid_card(&item(), CardState::default(), None, MIN_FRAMED_WIDTH, &styles);
        assert!(framed.len() > 1);
        assert_width(&framed, MIN_FRAMED_WIDTH);
    }

    #[test]
    fn test_short_description_is_not_padded_to_limit() {
        let mut short = item();
        short.description = "Short.".to_string();
        let styles = CardStyles::default();
        let lines = render_grid_card(&short, CardState::default(), None, 30, &styles);
        assert_eq!(lines.len(), 2 + BANNER_HEIGHT + 1 + 1);
    }
}
