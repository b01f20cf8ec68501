//! Small helpers for building game text.

/// Join items as English prose: "a", "a and b", "a, b, and c".
#[must_use]
pub fn oxford<T: std::fmt::Display>(items: &[T]) -> String {
    match items {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => {
            let head: Vec<String> = init.iter().map(ToString::to_string).collect();
            format!("{}, and {last}", head.join(", "))
        }
    }
}

/// "1 token", "2 tokens".
#[must_use]
pub fn plural(count: i64, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}
