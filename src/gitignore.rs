//! `.gitignore` pattern compilation
//!
//! Each non-blank, non-comment line of the root's `.gitignore` becomes an
//! [`IgnoreRule`]: case-insensitive regexes over root-relative,
//! `/`-separated paths. Whether the candidate is a directory is passed
//! alongside the path, so `build/` can skip a file named `build`.

use std::fs;
use std::path::Path;

use regex::{Regex, RegexBuilder};

/// A compiled `.gitignore` line.
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    pattern: String,
    anchored: bool,
    dir_only: bool,
    /// Matches the whole candidate path.
    matcher: Regex,
    /// Matches when some ancestor of the candidate matches.
    beneath: Regex,
}

impl IgnoreRule {
    /// Compile one trimmed `.gitignore` line.
    pub fn compile(line: &str) -> Result<Self, regex::Error> {
        let (body, anchored) = match line.strip_prefix('/') {
            Some(rest) => (rest, true),
            None => (line, false),
        };
        let (body, dir_only) = match body.strip_suffix('/') {
            Some(rest) => (rest, true),
            None => (body, false),
        };

        let mut expr = String::new();
        if !anchored && !body.contains('/') {
            expr.push_str("(?:.*/)?");
        }
        expr.push_str(&translate_glob(body));

        let matcher = build(&format!("^{expr}$"))?;
        // Ancestors are always directories, so this half ignores `dir_only`.
        let beneath = build(&format!("^{expr}/"))?;

        Ok(Self {
            pattern: line.to_string(),
            anchored,
            dir_only,
            matcher,
            beneath,
        })
    }

    /// Test a root-relative candidate such as `src/gen/a.rs`.
    ///
    /// The rule matches the candidate itself (only directories for a
    /// `dir/` rule) or any of its ancestor directories.
    pub fn matches(&self, candidate: &str, is_dir: bool) -> bool {
        self.beneath.is_match(candidate)
            || ((is_dir || !self.dir_only) && self.matcher.is_match(candidate))
    }

    /// The line this rule was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    pub fn is_dir_only(&self) -> bool {
        self.dir_only
    }

    /// The expression tested against the candidate path itself.
    pub fn as_regex(&self) -> &str {
        self.matcher.as_str()
    }
}

fn build(expr: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(expr).case_insensitive(true).build()
}

/// Translate glob syntax into a regex fragment, left to right.
fn translate_glob(glob: &str) -> String {
    let chars: Vec<char> = glob.chars().collect();
    let mut out = String::with_capacity(glob.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' if chars.get(i + 1) == Some(&'*') => {
                if chars.get(i + 2) == Some(&'/') {
                    out.push_str("(?:.*/)?");
                    i += 3;
                } else {
                    out.push_str(".*");
                    i += 2;
                }
                continue;
            }
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            '/' => out.push('/'),
            '[' => match class_end(&chars[i + 1..]) {
                Some(offset) => {
                    let end = i + 1 + offset;
                    let mut j = i + 1;
                    out.push('[');
                    if chars[j] == '!' {
                        out.push_str("^/");
                        j += 1;
                    }
                    for &c in &chars[j..end] {
                        if c == '\\' || c == '[' {
                            out.push('\\');
                        }
                        out.push(c);
                    }
                    out.push(']');
                    i = end + 1;
                    continue;
                }
                // Left unclosed so the expression fails to compile.
                None => out.push('['),
            },
            c => out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
        i += 1;
    }

    out
}

/// Offset of the `]` closing a bracket expression that starts after `[`.
/// A `]` right after `[` or `[!` is a literal member of the class.
fn class_end(rest: &[char]) -> Option<usize> {
    let mut start = usize::from(rest.first() == Some(&'!'));
    if rest.get(start) == Some(&']') {
        start += 1;
    }
    rest.get(start..)?
        .iter()
        .position(|&c| c == ']')
        .map(|p| p + start)
}

/// Read the raw lines of `<root>/.gitignore`, or nothing if it is absent.
pub fn read_gitignore(root: &Path) -> Vec<String> {
    match fs::read_to_string(root.join(".gitignore")) {
        Ok(content) => content.lines().map(str::to_string).collect(),
        Err(_) => Vec::new(),
    }
}

/// Trim lines and drop blanks and `#` comments.
pub fn parse_gitignore_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| {
            let line = line.as_ref().trim();
            if line.is_empty() || line.starts_with('#') {
                None
            } else {
                Some(line.to_string())
            }
        })
        .collect()
}

/// Compile every pattern, skipping (and warning about) the ones that fail.
pub fn compile_rules<I, S>(patterns: I) -> Vec<IgnoreRule>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    patterns
        .into_iter()
        .filter_map(|pattern| {
            let pattern = pattern.as_ref();
            match IgnoreRule::compile(pattern) {
                Ok(rule) => Some(rule),
                Err(e) => {
                    log::warn!("invalid pattern in .gitignore, skipped: {pattern} ({e})");
                    None
                }
            }
        })
        .collect()
}

/// Load and compile the rules of `<root>/.gitignore`.
pub fn load_rules(root: &Path) -> Vec<IgnoreRule> {
    let rules = compile_rules(parse_gitignore_lines(read_gitignore(root)));
    log::debug!("loaded {} .gitignore rule(s) from {}", rules.len(), root.display());
    rules
}
