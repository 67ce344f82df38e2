//! Declarative style variants for UI primitives.
//!
//! A [`VariantSpec`] maps each variant axis (size, shape, state...) to the
//! class tokens of each of its values. Resolving a [`Selection`] against a
//! spec appends, in order: the base tokens, the selected (or default) value
//! of every axis, every matching compound rule and the caller's extra
//! class. Conflicting utilities are then merged last-write-wins.

use crate::merge::{ClassMerge, TailwindMerge};
use folio_core::{Error, Result};

/// A named variant axis and the tokens of each of its values
#[derive(Debug, Clone, Copy)]
pub struct Axis {
    pub name: &'static str,
    pub values: &'static [(&'static str, &'static str)],
    pub default: &'static str,
}

impl Axis {
    pub fn class_for(&self, value: &str) -> Option<&'static str> {
        self.values
            .iter()
            .find(|(v, _)| *v == value)
            .map(|(_, class)| *class)
    }
}

/// Extra tokens applied when every `(axis, value)` condition holds
#[derive(Debug, Clone, Copy)]
pub struct CompoundRule {
    pub when: &'static [(&'static str, &'static str)],
    pub class: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct VariantSpec {
    pub base: &'static str,
    pub axes: &'static [Axis],
    pub compounds: &'static [CompoundRule],
}

/// Caller-supplied axis values; unset axes fall back to their default
#[derive(Debug, Clone, Default)]
pub struct Selection<'a> {
    values: Vec<(&'a str, &'a str)>,
    class: Option<&'a str>,
}

impl<'a> Selection<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, axis: &'a str, value: &'a str) -> Self {
        self.values.push((axis, value));
        self
    }

    /// Boolean axes take the values `"true"` and `"false"`
    pub fn flag(self, axis: &'a str, on: bool) -> Self {
        self.with(axis, if on { "true" } else { "false" })
    }

    /// Extra classes appended after every variant, e.g. from a component's
    /// `class` attribute
    pub fn class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }

    fn get(&self, axis: &str) -> Option<&'a str> {
        self.values
            .iter()
            .rev()
            .find(|(a, _)| *a == axis)
            .map(|(_, v)| *v)
    }
}

impl VariantSpec {
    /// Resolve a selection into a merged class string
    pub fn resolve(&self, selection: &Selection<'_>, merger: &dyn ClassMerge) -> String {
        let mut parts = vec![self.base];

        for axis in self.axes {
            let value = selection.get(axis.name).unwrap_or(axis.default);
            if let Some(class) = axis.class_for(value) {
                parts.push(class);
            }
        }

        for rule in self.compounds {
            let fires = rule
                .when
                .iter()
                .all(|(axis, value)| self.effective(axis, selection) == Some(*value));
            if fires {
                parts.push(rule.class);
            }
        }

        if let Some(class) = selection.class {
            parts.push(class);
        }

        merger.merge(&parts)
    }

    /// Resolve with the bundled Tailwind merger
    pub fn class(&self, selection: &Selection<'_>) -> String {
        self.resolve(selection, &TailwindMerge)
    }

    /// Check that defaults are declared values and that compound rules only
    /// reference declared axes and values
    pub fn validate(&self) -> Result<()> {
        for axis in self.axes {
            if axis.class_for(axis.default).is_none() {
                return Err(Error::UnknownVariantValue {
                    axis: axis.name.to_string(),
                    value: axis.default.to_string(),
                });
            }
        }

        for rule in self.compounds {
            for (axis_name, value) in rule.when {
                let axis = self.axis(axis_name).ok_or_else(|| Error::UnknownVariantAxis {
                    axis: axis_name.to_string(),
                })?;
                if axis.class_for(value).is_none() {
                    return Err(Error::UnknownVariantValue {
                        axis: axis_name.to_string(),
                        value: value.to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn axis(&self, name: &str) -> Option<&Axis> {
        self.axes.iter().find(|a| a.name == name)
    }

    fn effective<'s>(&self, axis_name: &str, selection: &Selection<'s>) -> Option<&'s str> {
        let axis = self.axis(axis_name)?;
        Some(selection.get(axis_name).unwrap_or(axis.default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: VariantSpec = VariantSpec {
        base: "inline-flex rounded-md",
        axes: &[
            Axis {
                name: "size",
                values: &[("sm", "h-8 px-3"), ("md", "h-10 px-4"), ("lg", "h-12 px-8")],
                default: "md",
            },
            Axis {
                name: "shape",
                values: &[("rounded", ""), ("pill", "rounded-full")],
                default: "rounded",
            },
            Axis {
                name: "active",
                values: &[("true", "text-primary"), ("false", "text-muted")],
                default: "false",
            },
        ],
        compounds: &[
            CompoundRule {
                when: &[("size", "lg"), ("shape", "pill")],
                class: "px-10",
            },
            CompoundRule {
                when: &[("size", "md"), ("active", "false")],
                class: "opacity-80",
            },
        ],
    };

    #[test]
    fn test_defaults_and_matching_compounds() {
        assert_eq!(
            SPEC.class(&Selection::new()),
            "inline-flex rounded-md h-10 px-4 text-muted opacity-80"
        );
    }

    #[test]
    fn test_selected_values() {
        assert_eq!(
            SPEC.class(&Selection::new().with("size", "sm").flag("active", true)),
            "inline-flex rounded-md h-8 px-3 text-primary"
        );
    }

    #[test]
    fn test_compound_rule_overrides_axis_tokens() {
        assert_eq!(
            SPEC.class(&Selection::new().with("size", "lg").with("shape", "pill")),
            "inline-flex h-12 rounded-full text-muted px-10"
        );
    }

    #[test]
    fn test_unknown_values_and_axes_contribute_nothing() {
        let resolved = SPEC.class(
            &Selection::new()
                .with("size", "huge")
                .with("colour", "red"),
        );
        assert_eq!(resolved, "inline-flex rounded-md text-muted");
    }

    #[test]
    fn test_later_selection_of_same_axis_wins() {
        let resolved = SPEC.class(&Selection::new().with("size", "sm").with("size", "lg"));
        assert!(resolved.contains("h-12"));
        assert!(!resolved.contains("h-8"));
    }

    #[test]
    fn test_extra_class_applied_last() {
        let resolved = SPEC.class(&Selection::new().class("px-0 mt-2"));
        assert_eq!(resolved, "inline-flex rounded-md h-10 text-muted opacity-80 px-0 mt-2");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let sel = Selection::new().with("shape", "pill").flag("active", true);
        assert_eq!(SPEC.class(&sel), SPEC.class(&sel));
    }

    #[test]
    fn test_base_tokens_always_present_for_declared_values() {
        for axis in SPEC.axes {
            for (value, _) in axis.values {
                let resolved = SPEC.class(&Selection::new().with(axis.name, value));
                assert!(resolved.starts_with("inline-flex"), "{}={}", axis.name, value);
            }
        }
    }

    #[test]
    fn test_validate() {
        assert!(SPEC.validate().is_ok());

        let bad_axis = VariantSpec {
            compounds: &[CompoundRule {
                when: &[("tone", "loud")],
                class: "uppercase",
            }],
            ..SPEC
        };
        assert!(matches!(
            bad_axis.validate(),
            Err(Error::UnknownVariantAxis { ref axis }) if axis == "tone"
        ));

        let bad_default = VariantSpec {
            axes: &[Axis {
                name: "size",
                values: &[("sm", "h-8")],
                default: "md",
            }],
            compounds: &[],
            ..SPEC
        };
        assert!(matches!(
            bad_default.validate(),
            Err(Error::UnknownVariantValue { .. })
        ));
    }

    #[test]
    fn test_custom_merger() {
        struct Concat;
        impl ClassMerge for Concat {
            fn merge(&self, classes: &[&str]) -> String {
                classes.join("|")
            }
        }
        let resolved = SPEC.resolve(&Selection::new().with("size", "sm"), &Concat);
        assert_eq!(resolved, "inline-flex rounded-md|h-8 px-3||text-muted");
    }
}
