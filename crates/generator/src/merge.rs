//! Tailwind-style class merging.
//!
//! Later utilities win over earlier ones from the same conflict group,
//! scoped by variant prefix (`hover:`, `md:`, `dark:`...) and the `!`
//! important marker. Tokens that cannot be classified are kept as-is,
//! apart from exact duplicates, which collapse to their last position.

/// Merges a sequence of class strings into one deduplicated class string
pub trait ClassMerge {
    fn merge(&self, classes: &[&str]) -> String;
}

/// Conflict resolution for the Tailwind utility families used by the
/// component tables
#[derive(Debug, Default, Clone, Copy)]
pub struct TailwindMerge;

impl ClassMerge for TailwindMerge {
    fn merge(&self, classes: &[&str]) -> String {
        let mut kept: Vec<(&str, Option<GroupKey<'_>>)> = Vec::new();

        for token in classes.iter().flat_map(|c| c.split_whitespace()) {
            let key = group_key(token);

            kept.retain(|(existing, existing_key)| {
                if *existing == token {
                    return false;
                }
                match (&key, existing_key) {
                    (Some(new), Some(old)) => !new.overrides(old),
                    _ => true,
                }
            });
            kept.push((token, key));
        }

        kept.iter()
            .map(|(token, _)| *token)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct GroupKey<'a> {
    modifiers: &'a str,
    important: bool,
    group: &'static str,
}

impl GroupKey<'_> {
    fn overrides(&self, older: &GroupKey<'_>) -> bool {
        self.modifiers == older.modifiers
            && self.important == older.important
            && (self.group == older.group || conflicts(self.group).contains(&older.group))
    }
}

fn group_key(token: &str) -> Option<GroupKey<'_>> {
    let (modifiers, utility) = match modifier_end(token) {
        Some(i) => (&token[..i], &token[i + 1..]),
        None => ("", token),
    };
    let (important, utility) = match utility.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, utility),
    };
    let utility = utility.strip_prefix('-').unwrap_or(utility);

    classify(utility).map(|group| GroupKey {
        modifiers,
        important,
        group,
    })
}

/// Position of the last `:` outside arbitrary-value brackets
fn modifier_end(token: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut end = None;
    for (i, b) in token.bytes().enumerate() {
        match b {
            b'[' => depth += 1,
            b']' => depth = depth.saturating_sub(1),
            b':' if depth == 0 => end = Some(i),
            _ => {}
        }
    }
    end
}

const DISPLAY: &[&str] = &[
    "block",
    "inline-block",
    "inline",
    "flex",
    "inline-flex",
    "grid",
    "inline-grid",
    "table",
    "contents",
    "hidden",
];

const POSITION: &[&str] = &["static", "fixed", "absolute", "relative", "sticky"];

const TEXT_SIZES: &[&str] = &[
    "xs", "sm", "base", "lg", "xl", "2xl", "3xl", "4xl", "5xl", "6xl", "7xl", "8xl", "9xl",
];

const TEXT_ALIGN: &[&str] = &["left", "center", "right", "justify", "start", "end"];

const TEXT_OVERFLOW: &[&str] = &["ellipsis", "clip"];

const TEXT_WRAP: &[&str] = &["wrap", "nowrap", "balance", "pretty"];

const FONT_WEIGHTS: &[&str] = &[
    "thin",
    "extralight",
    "light",
    "normal",
    "medium",
    "semibold",
    "bold",
    "extrabold",
    "black",
];

const BORDER_STYLES: &[&str] = &["solid", "dashed", "dotted", "double", "hidden", "none"];

const BORDER_SIDES: &[&str] = &["t", "r", "b", "l", "x", "y", "s", "e"];

/// Utility prefixes whose value follows a `-`, longest first within a family
const PREFIX_GROUPS: &[(&str, &str)] = &[
    ("px", "px"),
    ("py", "py"),
    ("pt", "pt"),
    ("pr", "pr"),
    ("pb", "pb"),
    ("pl", "pl"),
    ("ps", "ps"),
    ("pe", "pe"),
    ("p", "p"),
    ("mx", "mx"),
    ("my", "my"),
    ("mt", "mt"),
    ("mr", "mr"),
    ("mb", "mb"),
    ("ml", "ml"),
    ("ms", "ms"),
    ("me", "me"),
    ("m", "m"),
    ("min-w", "min-w"),
    ("min-h", "min-h"),
    ("max-w", "max-w"),
    ("max-h", "max-h"),
    ("size", "size"),
    ("w", "w"),
    ("h", "h"),
    ("gap-x", "gap-x"),
    ("gap-y", "gap-y"),
    ("gap", "gap"),
    ("rounded-tl", "rounded-tl"),
    ("rounded-tr", "rounded-tr"),
    ("rounded-br", "rounded-br"),
    ("rounded-bl", "rounded-bl"),
    ("rounded-t", "rounded-t"),
    ("rounded-r", "rounded-r"),
    ("rounded-b", "rounded-b"),
    ("rounded-l", "rounded-l"),
    ("rounded", "rounded"),
    ("shadow", "shadow"),
    ("opacity", "opacity"),
    ("z", "z"),
    ("justify", "justify"),
    ("items", "items"),
    ("self", "self"),
    ("leading", "leading"),
    ("tracking", "tracking"),
    ("underline-offset", "underline-offset"),
    ("ring-offset", "ring-offset"),
    ("whitespace", "whitespace"),
    ("cursor", "cursor"),
    ("overflow-x", "overflow-x"),
    ("overflow-y", "overflow-y"),
    ("overflow", "overflow"),
];

fn classify(utility: &str) -> Option<&'static str> {
    if DISPLAY.contains(&utility) {
        return Some("display");
    }
    if POSITION.contains(&utility) {
        return Some("position");
    }
    match utility {
        "rounded" => return Some("rounded"),
        "shadow" => return Some("shadow"),
        "border" => return Some("border-w"),
        "truncate" => return Some("text-overflow"),
        "underline" | "no-underline" | "line-through" | "overline" => {
            return Some("text-decoration");
        }
        _ => {}
    }

    if let Some(value) = utility.strip_prefix("text-") {
        return Some(if TEXT_SIZES.contains(&value) {
            "text-size"
        } else if TEXT_ALIGN.contains(&value) {
            "text-align"
        } else if TEXT_OVERFLOW.contains(&value) {
            "text-overflow"
        } else if TEXT_WRAP.contains(&value) {
            "text-wrap"
        } else {
            "text-color"
        });
    }
    if let Some(value) = utility.strip_prefix("font-") {
        return Some(if FONT_WEIGHTS.contains(&value) {
            "font-weight"
        } else {
            "font-family"
        });
    }
    if utility.starts_with("bg-") {
        return Some("bg");
    }
    if let Some(value) = utility.strip_prefix("border-") {
        let head = value.split('-').next().unwrap_or(value);
        if BORDER_SIDES.contains(&head) {
            // per-side borders are left alone
            return None;
        }
        return Some(if value.bytes().all(|b| b.is_ascii_digit()) {
            "border-w"
        } else if BORDER_STYLES.contains(&value) {
            "border-style"
        } else {
            "border-color"
        });
    }
    if let Some(value) = utility.strip_prefix("ring-") {
        if value.starts_with("offset-") {
            return Some("ring-offset");
        }
        return Some(if value.bytes().all(|b| b.is_ascii_digit()) {
            "ring-w"
        } else {
            "ring-color"
        });
    }

    PREFIX_GROUPS
        .iter()
        .find(|(prefix, _)| {
            utility
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('-'))
        })
        .map(|(_, group)| *group)
}

/// Groups removed by a later utility from `group`
fn conflicts(group: &str) -> &'static [&'static str] {
    match group {
        "p" => &["px", "py", "pt", "pr", "pb", "pl", "ps", "pe"],
        "px" => &["pr", "pl", "ps", "pe"],
        "py" => &["pt", "pb"],
        "m" => &["mx", "my", "mt", "mr", "mb", "ml", "ms", "me"],
        "mx" => &["mr", "ml", "ms", "me"],
        "my" => &["mt", "mb"],
        "size" => &["w", "h"],
        "gap" => &["gap-x", "gap-y"],
        "rounded" => &[
            "rounded-t",
            "rounded-r",
            "rounded-b",
            "rounded-l",
            "rounded-tl",
            "rounded-tr",
            "rounded-br",
            "rounded-bl",
        ],
        "rounded-t" => &["rounded-tl", "rounded-tr"],
        "rounded-r" => &["rounded-tr", "rounded-br"],
        "rounded-b" => &["rounded-br", "rounded-bl"],
        "rounded-l" => &["rounded-tl", "rounded-bl"],
        "overflow" => &["overflow-x", "overflow-y"],
        _ => &[],
    }
}
