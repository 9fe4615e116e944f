//! Command implementations.

use anyhow::{Context, Result};
use coding_model::{Coding, SerializeOptions, as_character, print_coding};

use coding_cli::choices::load_codings;
use crate::cli::{ChoicesArgs, EvalArgs, SerializeArgs};

pub fn run_lists(args: &ChoicesArgs) -> Result<()> {
    let codings = load_codings(&args.choices, args.list_name.as_deref())?;
    for coding in &codings {
        println!(
            "{}\t{}",
            coding.label().unwrap_or("<unnamed>"),
            coding.len()
        );
    }
    Ok(())
}

pub fn run_show(args: &ChoicesArgs) -> Result<()> {
    let codings = load_codings(&args.choices, args.list_name.as_deref())?;
    for (index, coding) in codings.iter().enumerate() {
        if index > 0 {
            println!();
        }
        print_coding(coding);
    }
    Ok(())
}

pub fn run_serialize(args: &SerializeArgs) -> Result<()> {
    let codings = load_codings(&args.choices.choices, args.choices.list_name.as_deref())?;
    let options = SerializeOptions::default().with_links_from(args.links_from);
    for coding in &codings {
        println!("{}", as_character(coding, options));
    }
    Ok(())
}

pub fn run_eval(args: &EvalArgs) -> Result<()> {
    let coding: Coding = args
        .expr
        .parse()
        .context("evaluate coding expression")?;
    tracing::info!(codes = coding.len(), "evaluated coding");
    print_coding(&coding);
    Ok(())
}
