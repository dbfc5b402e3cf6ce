//! `formforge palette` and `formforge names`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use formforge_core::registry::{self, logical_names};
use formforge_core::{Audience, Category};

use super::load;

/// List every field type, grouped by category.
#[derive(Args, Debug)]
pub struct PaletteArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,

    /// Only list this category: input | selection | consent | layout.
    #[arg(long, short = 'c')]
    pub category: Option<Category>,
}

#[derive(Tabled)]
struct PaletteRow {
    #[tabled(rename = "")]
    icon: &'static str,
    #[tabled(rename = "key")]
    key: &'static str,
    #[tabled(rename = "label")]
    label: &'static str,
    #[tabled(rename = "block type")]
    block_type: &'static str,
}

#[derive(Serialize)]
struct CategoryJson {
    id: &'static str,
    label: &'static str,
    types: Vec<TypeJson>,
}

#[derive(Serialize)]
struct TypeJson {
    key: &'static str,
    label: &'static str,
    icon: &'static str,
    block_type: &'static str,
}

impl PaletteArgs {
    pub fn run(self) -> Result<()> {
        let registry = registry::registry();
        let categories: Vec<Category> = registry
            .categories()
            .iter()
            .copied()
            .filter(|c| self.category.map_or(true, |only| only == *c))
            .collect();

        if self.json {
            let payload: Vec<CategoryJson> = categories
                .iter()
                .map(|category| CategoryJson {
                    id: category.id(),
                    label: category.label(),
                    types: registry
                        .types_in_category(*category)
                        .map(|(key, def)| TypeJson {
                            key,
                            label: def.label,
                            icon: def.icon,
                            block_type: def.block_type,
                        })
                        .collect(),
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize palette")?
            );
            return Ok(());
        }

        for category in &categories {
            println!("{}", category.label().bold());
            let rows: Vec<PaletteRow> = registry
                .types_in_category(*category)
                .map(|(key, def)| PaletteRow {
                    icon: def.icon,
                    key,
                    label: def.label,
                    block_type: def.block_type,
                })
                .collect();
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            println!("{table}");
        }
        Ok(())
    }
}

/// List suggested logical names for an audience.
#[derive(Args, Debug)]
pub struct NamesArgs {
    /// Backing entity: contact | lead.
    #[arg(long, short = 'a', conflicts_with = "form")]
    pub audience: Option<Audience>,

    /// Take the audience from this form file.
    #[arg(long, value_name = "FILE")]
    pub form: Option<PathBuf>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct NameRow {
    #[tabled(rename = "logical name")]
    value: &'static str,
    #[tabled(rename = "label")]
    label: &'static str,
}

impl NamesArgs {
    pub fn run(self) -> Result<()> {
        let audience = match (self.audience, &self.form) {
            (Some(audience), _) => audience,
            (None, Some(path)) => load(path)?.audience,
            (None, None) => Audience::default(),
        };

        let names = logical_names(audience);
        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(names).context("failed to serialize names")?
            );
            return Ok(());
        }

        let rows: Vec<NameRow> = names
            .iter()
            .map(|n| NameRow {
                value: n.value,
                label: n.label,
            })
            .collect();
        println!("{} {}", "Audience:".bold(), audience);
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}
