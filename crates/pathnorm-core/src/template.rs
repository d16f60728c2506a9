//! Replacement templates.
//!
//! Rule configs are commonly written with the `$`-references understood by
//! JavaScript-style engines (`$1`, `$&`, `$<name>`). [`translate`] rewrites
//! such a template into the syntax `regex::Regex::replace` expects, so that
//! `$1a` still means "group 1 followed by `a`" instead of a group named `1a`.
//!
//! | Input      | Output       | Meaning                                   |
//! |------------|--------------|-------------------------------------------|
//! | `$$`       | `$$`         | literal `$`                               |
//! | `$&`       | `${0}`       | whole match                               |
//! | `$n`/`$nn` | `${n}`       | numbered group, if it exists              |
//! | `$<name>`  | `${name}`    | named group (pattern has named groups)    |
//! | `${name}`  | `${name}`    | passed through                            |
//! | other `$`  | `$$`         | literal `$`                               |

use regex::Regex;

/// Rewrite `template` for use with `re`.
pub fn translate(template: &str, re: &Regex) -> String {
    // Fast path: nothing to rewrite.
    if !template.contains('$') {
        return template.to_string();
    }

    let group_count = re.captures_len() - 1;
    let has_named = re.capture_names().flatten().next().is_some();
    let bytes = template.as_bytes();
    let mut out = String::with_capacity(template.len() + 8);
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' {
            // Copy the run up to the next `$` in one go so multi-byte
            // characters are never split.
            let end = template[i..].find('$').map_or(bytes.len(), |off| i + off);
            out.push_str(&template[i..end]);
            i = end;
            continue;
        }

        match bytes.get(i + 1) {
            Some(b'$') => {
                out.push_str("$$");
                i += 2;
            }
            Some(b'&') => {
                out.push_str("${0}");
                i += 2;
            }
            Some(d) if d.is_ascii_digit() => {
                let first = usize::from(d - b'0');
                let two = bytes
                    .get(i + 2)
                    .filter(|c| c.is_ascii_digit())
                    .map(|c| first * 10 + usize::from(c - b'0'));
                match two {
                    Some(n) if (1..=group_count).contains(&n) => {
                        out.push_str(&format!("${{{n}}}"));
                        i += 3;
                    }
                    _ if (1..=group_count).contains(&first) => {
                        out.push_str(&format!("${{{first}}}"));
                        i += 2;
                    }
                    _ => {
                        out.push_str("$$");
                        i += 1;
                    }
                }
            }
            Some(b'<') if has_named => match template[i + 2..].find('>') {
                Some(off) => {
                    let name = &template[i + 2..i + 2 + off];
                    out.push_str(&format!("${{{name}}}"));
                    i += 2 + off + 1;
                }
                None => {
                    out.push_str("$$");
                    i += 1;
                }
            },
            Some(b'{') => match template[i + 2..].find('}') {
                Some(off) => {
                    out.push_str(&template[i..i + 2 + off + 1]);
                    i += 2 + off + 1;
                }
                None => {
                    out.push_str("$$");
                    i += 1;
                }
            },
            _ => {
                out.push_str("$$");
                i += 1;
            }
        }
    }

    out
}
