//! Reverse Polish notation calculator behind the shared `rpn` command.
//!
//! Numbers are pushed; operators pop their operands and push their results.
//! `/%` pushes both quotient and remainder. `R` and `F` take no operands and
//! push a random fraction and a coin flip (0 or 1).

use crate::core::{GameError, GameRng, Result};

/// Evaluate an expression and render the remaining stack.
pub fn evaluate(expression: &str, rng: &mut GameRng) -> Result<String> {
    let mut stack: Vec<f64> = Vec::new();

    for word in expression.split_whitespace() {
        if let Ok(number) = word.parse::<f64>() {
            stack.push(number);
            continue;
        }
        let arity = arity(word).ok_or_else(|| GameError::Parse(word.to_string()))?;
        if stack.len() < arity {
            return Err(GameError::illegal(format!(
                "Not enough values on the stack for {word:?} (needs {arity})."
            )));
        }
        let args = stack.split_off(stack.len() - arity);
        stack.extend(apply(word, &args, rng)?);
    }

    Ok(stack.iter().map(|&x| format_number(x)).collect::<Vec<_>>().join(" "))
}

fn arity(op: &str) -> Option<usize> {
    let n = match op {
        "R" | "F" => 0,
        "|" | "!" | "+-" | "1/" | "cos" | "sin" | "tan" | "ln" | "log" | "V" => 1,
        "+" | "-" | "*" | "/" | "//" | "%" | "^" | "C" | "P" | "/%" => 2,
        "ab/c" => 3,
        _ => return None,
    };
    Some(n)
}

fn apply(op: &str, args: &[f64], rng: &mut GameRng) -> Result<Vec<f64>> {
    let nonzero = |x: f64| {
        if x == 0.0 {
            Err(GameError::illegal("Division by zero."))
        } else {
            Ok(x)
        }
    };

    let value = match (op, args) {
        ("R", []) => rng.gen_f64(),
        ("F", []) => f64::from(u8::from(rng.gen_bool(0.5))),
        ("|", [a]) => a.abs(),
        ("!", [a]) => factorial(*a)?,
        ("+-", [a]) => -a,
        ("1/", [a]) => 1.0 / nonzero(*a)?,
        ("cos", [a]) => a.cos(),
        ("sin", [a]) => a.sin(),
        ("tan", [a]) => a.tan(),
        ("ln", [a]) => a.ln(),
        ("log", [a]) => a.log10(),
        ("V", [a]) => a.sqrt(),
        ("+", [a, b]) => a + b,
        ("-", [a, b]) => a - b,
        ("*", [a, b]) => a * b,
        ("/", [a, b]) => a / nonzero(*b)?,
        ("//", [a, b]) => (a / nonzero(*b)?).floor(),
        ("%", [a, b]) => a.rem_euclid(nonzero(*b)?),
        ("^", [a, b]) => a.powf(*b),
        ("C", [n, k]) => choose(*n, *k)?,
        ("P", [n, k]) => permutations(*n, *k)?,
        ("/%", [a, b]) => {
            let b = nonzero(*b)?;
            return Ok(vec![(a / b).floor(), a.rem_euclid(b)]);
        }
        ("ab/c", [a, b, c]) => a + b / nonzero(*c)?,
        _ => return Err(GameError::Parse(op.to_string())),
    };
    Ok(vec![value])
}

fn whole(x: f64) -> Result<u64> {
    if x < 0.0 || x.fract() != 0.0 || x > 170.0 {
        Err(GameError::illegal(format!("{} is not a small whole number.", format_number(x))))
    } else {
        Ok(x as u64)
    }
}

fn factorial(x: f64) -> Result<f64> {
    let n = whole(x)?;
    Ok((1..=n).map(|i| i as f64).product())
}

fn permutations(n: f64, k: f64) -> Result<f64> {
    let (n, k) = (whole(n)?, whole(k)?);
    if k > n {
        return Ok(0.0);
    }
    Ok(((n - k + 1)..=n).map(|i| i as f64).product())
}

fn choose(n: f64, k: f64) -> Result<f64> {
    let (n, k) = (whole(n)?, whole(k)?);
    if k > n {
        return Ok(0.0);
    }
    let k = k.min(n - k);
    let mut result = 1.0;
    for i in 0..k {
        result = result * (n - i) as f64 / (i + 1) as f64;
    }
    Ok(result.round())
}

fn format_number(x: f64) -> String {
    if x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{}", x as i64)
    } else {
        format!("{x}")
    }
}
