//! Sentinel tokens exchanged between steps and the runner
//!
//! Grammar: the literal `OK`, the literal `..` (back), and `NEXT__` followed
//! by a registered step identifier.

/// Completion marker; stored like any other answer, never interpreted by the runner
pub const RESULT_OK: &str = "OK";

/// Answer meaning "return to the previous step"
pub const RESULT_BACK: &str = "..";

/// Prefix word of a jump token
pub const RESULT_NEXT: &str = "NEXT";

const JUMP_SEPARATOR: &str = "__";

/// Build a jump token without checking the target
pub(crate) fn encode_jump(step_id: &str) -> String {
    format!("{}{}{}", RESULT_NEXT, JUMP_SEPARATOR, step_id)
}

/// Extract the target step id of a jump token
///
/// Returns `None` for anything that is not `NEXT__<id>` with a non-empty id.
pub fn parse_jump(token: &str) -> Option<&str> {
    token
        .strip_prefix(RESULT_NEXT)
        .and_then(|rest| rest.strip_prefix(JUMP_SEPARATOR))
        .filter(|id| !id.is_empty())
}

/// Whether an answer is the back sentinel
pub fn is_back(answer: &str) -> bool {
    answer == RESULT_BACK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_jump() {
        assert_eq!(encode_jump("done"), "NEXT__done");
    }

    #[test]
    fn test_parse_jump() {
        assert_eq!(parse_jump("NEXT__done"), Some("done"));
        assert_eq!(parse_jump("NEXT__ask__twice"), Some("ask__twice"));
        assert_eq!(parse_jump("NEXT__"), None);
        assert_eq!(parse_jump("NEXT_done"), None);
        assert_eq!(parse_jump("next__done"), None);
        assert_eq!(parse_jump(RESULT_OK), None);
        assert_eq!(parse_jump(""), None);
    }

    #[test]
    fn test_is_back() {
        assert!(is_back(".."));
        assert!(!is_back("..."));
        assert!(!is_back(" .."));
    }
}
