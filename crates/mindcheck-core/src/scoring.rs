//! Answer scoring.

/// The answer counted when deciding whether a stage passes.
pub const NO: &str = "no";

/// Count the answers equal to `target`.
///
/// Answers are expected to be normalized already (see
/// [`normalize_answer`](crate::model::normalize_answer)).
pub fn score<I, S>(answers: I, target: &str) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    answers
        .into_iter()
        .filter(|answer| answer.as_ref() == target)
        .count()
}
