//! Overlay text aggregation
//!
//! Reads the note and every watched variable, drops whatever is unbound,
//! empty or unreadable, and joins the rest into the overlay text.

use crate::host::VariableHost;

/// Collect the values to display, in order: note, note variables, redirected variables
///
/// A variable named in both lists is read once, in its note position.
pub fn current_values<H: VariableHost + ?Sized>(
    host: &H,
    notes: &[String],
    redirected: &[String],
    note: Option<&str>,
) -> Vec<String> {
    let mut values = Vec::with_capacity(1 + notes.len() + redirected.len());

    if let Some(note) = note.filter(|n| !n.is_empty()) {
        values.push(note.to_string());
    }

    let redirected = redirected.iter().filter(|name| !notes.contains(name));
    for name in notes.iter().chain(redirected) {
        match host.value(name) {
            Ok(Some(value)) if !value.is_empty() => values.push(value),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(variable = %name, error = %e, "Omitting unreadable variable");
            }
        }
    }

    values
}

/// Join values with `separator`
pub fn render(values: &[String], separator: &str) -> String {
    values.join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::VariableTable;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_note_then_values() {
        let mut vars = VariableTable::new();
        vars.set("clock", "12:00");

        let values = current_values(&vars, &[], &names(&["clock"]), Some("WFH"));
        assert_eq!(values, vec!["WFH", "12:00"]);
        assert_eq!(render(&values, " "), "WFH 12:00");
    }

    #[test]
    fn test_empty_and_unbound_leave_no_artifacts() {
        let mut vars = VariableTable::new();
        vars.set("clock", "");
        vars.define("battery");
        vars.set("player", "paused");

        let values = current_values(
            &vars,
            &names(&["mail"]),
            &names(&["clock", "battery", "player"]),
            Some(""),
        );
        assert_eq!(values, vec!["paused"]);

        let text = render(&values, " | ");
        assert_eq!(text, "paused");
        assert!(!text.starts_with(' ') && !text.ends_with(' '));
    }

    #[test]
    fn test_order_is_notes_then_redirected() {
        let mut vars = VariableTable::new();
        vars.set("clock", "12:00");
        vars.set("mail", "3 new");

        let values = current_values(&vars, &names(&["mail"]), &names(&["clock"]), None);
        assert_eq!(render(&values, ","), "3 new,12:00");
    }

    #[test]
    fn test_faulty_variable_is_isolated() {
        let mut vars = VariableTable::new();
        vars.set("clock", "12:00");
        vars.set("battery", "80%");
        vars.set_faulty("clock", true);

        let values = current_values(&vars, &[], &names(&["clock", "battery"]), None);
        assert_eq!(values, vec!["80%"]);
    }

    #[test]
    fn test_render_edge_cases() {
        assert_eq!(render(&[], " "), "");
        assert_eq!(render(&names(&["a", "b"]), ""), "ab");
    }

    #[test]
    fn test_variable_in_both_lists_is_read_once() {
        let mut vars = VariableTable::new();
        vars.set("clock", "12:00");
        vars.set("battery", "80%");

        let values = current_values(
            &vars,
            &names(&["clock"]),
            &names(&["clock", "battery"]),
            None,
        );
        assert_eq!(values, vec!["12:00", "80%"]);
    }
}
