//! Hover text for bars.

use super::geometry::Direction;

/// Fields shown in a bar's tooltip, in display order.
#[derive(Clone, Copy, Debug)]
pub struct TooltipFields<'a> {
    pub parcel: &'a str,
    pub parameter: &'a str,
    pub attention: &'a str,
    pub direction: Direction,
    pub date: Option<&'a str>,
    pub note: Option<&'a str>,
}

/// One line per present field. Absent or empty optional fields are left out
/// rather than shown blank.
pub fn tooltip_text(fields: &TooltipFields<'_>) -> String {
    let direction = match fields.direction {
        Direction::Center => "Bull's-eye (ideal)".to_string(),
        other => format!("Direction: {}", other.as_str()),
    };

    let present = |value: Option<&str>| value.filter(|v| !v.trim().is_empty()).map(str::to_string);

    [
        Some(format!("Parcel: {}", fields.parcel)),
        Some(format!("Parameter: {}", fields.parameter)),
        Some(format!("Attention: {}", fields.attention)),
        Some(direction),
        present(fields.date).map(|date| format!("Date: {date}")),
        present(fields.note).map(|note| format!("Note: {note}")),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> TooltipFields<'static> {
        TooltipFields {
            parcel: "Parcela 1",
            parameter: "pH",
            attention: "yellow",
            direction: Direction::Left,
            date: None,
            note: None,
        }
    }

    #[test]
    fn all_fields_in_order() {
        let text = tooltip_text(&TooltipFields {
            date: Some("2025-03-01"),
            note: Some("resample in spring"),
            ..fields()
        });
        insta::assert_snapshot!(text, @r"
        Parcel: Parcela 1
        Parameter: pH
        Attention: yellow
        Direction: left
        Date: 2025-03-01
        Note: resample in spring
        ");
    }

    #[test]
    fn center_reads_as_bulls_eye() {
        let text = tooltip_text(&TooltipFields {
            direction: Direction::Center,
            ..fields()
        });
        insta::assert_snapshot!(text, @r"
        Parcel: Parcela 1
        Parameter: pH
        Attention: yellow
        Bull's-eye (ideal)
        ");
    }

    #[test]
    fn empty_optional_fields_are_omitted() {
        let text = tooltip_text(&TooltipFields {
            date: Some(""),
            note: Some("  "),
            ..fields()
        });
        assert_eq!(text.lines().count(), 4);
        assert!(!text.contains("Date"));
        assert!(!text.contains("Note"));
    }
}
