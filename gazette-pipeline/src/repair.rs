//! Best-effort JSON extraction and repair for raw model output.
//!
//! Generative APIs wrap JSON in prose or code fences and truncate at token
//! budgets. [`repair`] recovers the usable object without ever inventing
//! field values: it strips wrapping, removes the one syntactic defect
//! models emit constantly (trailing commas), and closes unbalanced syntax
//! left by truncation. It never fails; on unrecoverable input the caller's
//! parse attempt fails instead and is handled as a schema violation.

/// Repair raw model output into the best-effort JSON object string.
///
/// Each step is a no-op when not applicable:
/// 1. strip a wrapping Markdown code fence,
/// 2. slice to the outermost `{`…`}` span (drops surrounding prose),
/// 3. remove trailing commas before `}` / `]`,
/// 4. return as-is if it now parses,
/// 5. otherwise close any open string and balance unclosed `{` / `[`.
#[must_use]
pub fn repair(raw: &str) -> String {
    let cleaned = strip_code_fence(raw.trim());
    let Some(sliced) = slice_to_object(cleaned) else {
        // No object start at all: hand back the cleaned text so the caller
        // surfaces a refusal-style parse failure with the original content.
        return cleaned.to_string();
    };
    let candidate = remove_trailing_commas(sliced);

    if serde_json::from_str::<serde_json::Value>(&candidate).is_ok() {
        return candidate;
    }

    balance_truncation(&candidate)
}

/// Strip a leading/trailing fenced code block, with or without a language tag.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag line ("json", "JSON", or nothing).
    let rest = match rest.split_once('\n') {
        Some((_tag, body)) => body,
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };
    rest.trim().trim_end_matches("```").trim()
}

/// Slice to the first `{` … last `}` span; `None` when no `{` exists.
///
/// With an opening brace but no closing one (truncated output), keeps
/// everything from the brace onward for the balancing step.
fn slice_to_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    match text.rfind('}') {
        Some(end) if end > start => Some(&text[start..=end]),
        _ => Some(&text[start..]),
    }
}

/// Remove commas that directly precede a closing `}` or `]`, outside strings.
fn remove_trailing_commas(text: &str) -> String {
    let bytes: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in bytes.iter().enumerate() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' => {
                let next = bytes[i + 1..].iter().find(|c| !c.is_whitespace()).copied();
                if !matches!(next, Some('}') | Some(']')) {
                    out.push(c);
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// Close an open string and balance unclosed `{` / `[` left by truncation.
///
/// The result is still not guaranteed to parse; the caller re-attempts the
/// parse and treats a second failure as terminal for the attempt.
fn balance_truncation(text: &str) -> String {
    let mut stack: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for c in text.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => stack.push('}'),
            '[' => stack.push(']'),
            '}' | ']' => {
                if stack.last() == Some(&c) {
                    stack.pop();
                }
            }
            _ => {}
        }
    }

    let mut patched = text.to_string();
    if in_string {
        patched.push('"');
    }
    // A dangling separator before the synthesized closers would re-break
    // the parse; drop it.
    while patched.ends_with(|c: char| c.is_whitespace() || c == ',' || c == ':') {
        patched.pop();
    }
    for closer in stack.into_iter().rev() {
        patched.push(closer);
    }
    patched
}
