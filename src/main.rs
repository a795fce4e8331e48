//! An X11 Window Manager that is basically a Rust clone of `bspwm`

// monitor -> desktop -> node -> client

#![allow(unused)]
#![deny(
    clippy::all,
    // clippy::cargo,
    clippy::complexity,
    clippy::correctness,
    clippy::nursery,
    clippy::pedantic,
    clippy::perf,
    clippy::restriction,
    clippy::style,
    absolute_paths_not_starting_with_crate,
    anonymous_parameters,
    bad_style,
    const_err,
    // dead_code,
    ellipsis_inclusive_range_patterns,
    exported_private_dependencies,
    ill_formed_attribute_input,
    improper_ctypes,
    keyword_idents,
    macro_use_extern_crate,
    meta_variable_misuse,
    missing_abi,
    // missing_debug_implementations,
    // missing_docs,
    no_mangle_generic_items,
    non_shorthand_field_patterns,
    noop_method_call,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    pointer_structural_match,
    private_in_public,
    pub_use_of_private_extern_crate,
    semicolon_in_expressions_from_macros,
    single_use_lifetimes,
    trivial_casts,
    trivial_numeric_casts,
    unaligned_references,
    unconditional_recursion,
    unreachable_pub,
    unsafe_code,
    // unused,
    // unused_allocation,
    // unused_comparisons,
    // unused_extern_crates,
    // unused_import_braces,
    // unused_lifetimes,
    // unused_parens,
    // unused_qualifications,
    variant_size_differences,
    while_true
)]
#![allow(
    // Fill out documentation
    // clippy::missing_docs_in_private_items,

    // Find this problem
    clippy::pattern_type_mismatch,

    // ?
    clippy::redundant_pub_crate,

    clippy::as_conversions,
    clippy::blanket_clippy_restriction_lints,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cognitive_complexity,
    clippy::create_dir,
    clippy::doc_markdown,
    clippy::else_if_without_else,
    clippy::exhaustive_enums,
    clippy::exhaustive_structs,
    clippy::expect_used,
    clippy::exit,
    clippy::implicit_return,
    clippy::indexing_slicing,
    clippy::integer_arithmetic,
    clippy::integer_division,
    clippy::mod_module_files,
    clippy::multiple_inherent_impl,
    clippy::separated_literal_suffix,
    clippy::shadow_reuse,
    clippy::shadow_same,
    clippy::shadow_unrelated,
    clippy::similar_names,
    clippy::string_add,
    clippy::string_slice,
    clippy::struct_excessive_bools,
    clippy::too_many_lines,
    clippy::upper_case_acronyms,
    clippy::unreachable,
    clippy::unwrap_in_result,
    clippy::used_underscore_binding,
    clippy::single_char_lifetime_names,
    clippy::declare_interior_mutable_const,

    // Remove later
    clippy::print_stdout,
    clippy::use_debug,
    clippy::todo,

    // clippy::single_match_else,
)]
#![cfg_attr(
    any(test),
    allow(
        clippy::expect_fun_call,
        clippy::expect_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::unwrap_used,
        clippy::wildcard_enum_match_arm,
    )
)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss
)]

mod anim;
mod cli;
mod config;
mod core;
mod error;
mod events;
mod geometry;
mod history;
mod macros;
mod manager;
mod monitor;
mod pointer;
mod query;
mod rule;
mod stack;
mod tree;
mod utils;
mod world;
mod x;

use anyhow::Result;
use clap::Parser;
use cli::Opts;
use colored::Colorize;
use config::Config;
use crossbeam_channel::unbounded;
use events::Sources;
use manager::Manager;

fn main() -> Result<()> {
    let opts = Opts::parse();

    let config = opts
        .config
        .as_ref()
        .map_or_else(Config::load_default, Config::load)?;

    let _log_dir = utils::initialize_logging(&config, &opts)?;
    log::debug!("{}: {:#?}", "Configuration options".bright_blue(), config);

    // The X11 connection and command socket are boundary concerns wired in
    // once a server is attached; the channels stand in for them here so the
    // manager loop can be driven the same way either way.
    let (_server_tx, server_rx) = unbounded();
    let (_command_tx, command_rx) = unbounded();
    let sources = Sources { server: server_rx, command: command_rx };

    let mut manager = Manager::new(config);
    loop {
        if let Err(err) = manager.step(&sources) {
            log::warn!("event loop stopped: {err}");
            break;
        }
    }

    Ok(())
}
