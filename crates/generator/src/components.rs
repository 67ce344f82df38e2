//! Variant tables for the site's UI primitives

use crate::variants::{Axis, CompoundRule, VariantSpec};

pub const BUTTON: VariantSpec = VariantSpec {
    base: "inline-flex items-center justify-center gap-2 whitespace-nowrap rounded-md text-sm font-medium transition-colors focus-visible:outline-none focus-visible:ring-2 focus-visible:ring-ring disabled:pointer-events-none disabled:opacity-50",
    axes: &[
        Axis {
            name: "variant",
            values: &[
                ("default", "bg-primary text-primary-foreground hover:bg-primary/90"),
                ("destructive", "bg-destructive text-destructive-foreground hover:bg-destructive/90"),
                ("outline", "border border-input bg-background hover:bg-accent hover:text-accent-foreground"),
                ("secondary", "bg-secondary text-secondary-foreground hover:bg-secondary/80"),
                ("ghost", "hover:bg-accent hover:text-accent-foreground"),
                ("link", "text-primary underline-offset-4 hover:underline"),
            ],
            default: "default",
        },
        Axis {
            name: "size",
            values: &[
                ("default", "h-10 px-4 py-2"),
                ("sm", "h-9 rounded-md px-3"),
                ("lg", "h-11 rounded-md px-8"),
                ("icon", "size-10"),
            ],
            default: "default",
        },
    ],
    compounds: &[CompoundRule {
        when: &[("variant", "link"), ("size", "sm")],
        class: "h-auto px-0",
    }],
};

pub const BADGE: VariantSpec = VariantSpec {
    base: "inline-flex items-center rounded-full border px-2.5 py-0.5 text-xs font-semibold transition-colors",
    axes: &[Axis {
        name: "variant",
        values: &[
            ("default", "border-transparent bg-primary text-primary-foreground"),
            ("secondary", "border-transparent bg-secondary text-secondary-foreground"),
            ("outline", "text-foreground"),
            ("destructive", "border-transparent bg-destructive text-destructive-foreground"),
        ],
        default: "default",
    }],
    compounds: &[],
};

pub const AVATAR: VariantSpec = VariantSpec {
    base: "relative flex shrink-0 overflow-hidden",
    axes: &[
        Axis {
            name: "size",
            values: &[("sm", "size-8"), ("md", "size-10"), ("lg", "size-16")],
            default: "md",
        },
        Axis {
            name: "shape",
            values: &[("circle", "rounded-full"), ("square", "rounded-md")],
            default: "circle",
        },
    ],
    compounds: &[CompoundRule {
        when: &[("shape", "square"), ("size", "lg")],
        class: "rounded-xl",
    }],
};

pub const NAV_LINK: VariantSpec = VariantSpec {
    base: "text-sm font-medium transition-colors hover:text-foreground",
    axes: &[Axis {
        name: "active",
        values: &[
            ("true", "text-foreground underline underline-offset-8"),
            ("false", "text-muted-foreground"),
        ],
        default: "false",
    }],
    compounds: &[],
};

/// Every component table, by name
pub const ALL: &[(&str, VariantSpec)] = &[
    ("button", BUTTON),
    ("badge", BADGE),
    ("avatar", AVATAR),
    ("nav_link", NAV_LINK),
];

pub fn by_name(name: &str) -> Option<&'static VariantSpec> {
    ALL.iter().find(|(n, _)| *n == name).map(|(_, spec)| spec)
}
