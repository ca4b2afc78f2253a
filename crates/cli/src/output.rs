//! Terminal output.
//!
//! Everything the CLI prints goes through here. Logs go to stderr via
//! tracing; results go to stdout.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::fmt::Display;

use shopfront_storefront::error::AppError;
use shopfront_storefront::services::{AuthError, CheckoutError};
use shopfront_storefront::validation::FieldErrors;

/// Print one line.
pub fn line(text: impl Display) {
    println!("{text}");
}

/// Print a heading followed by a blank line.
pub fn heading(text: impl Display) {
    println!("{text}");
    println!();
}

/// Confirmation after a successful mutation.
pub fn done(text: impl Display) {
    println!("✓ {text}");
}

/// Print a left-aligned table. Column widths fit the widest cell.
pub fn table<const N: usize>(headers: [&str; N], rows: &[[String; N]]) {
    let mut widths = headers.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    println!("{}", render_row(headers.into_iter(), &widths));
    for row in rows {
        println!("{}", render_row(row.iter().map(String::as_str), &widths));
    }
}

fn render_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_owned()
}

/// Report a failed command on stderr. Validation failures list each field.
pub fn error(err: &AppError) {
    match err {
        AppError::Auth(AuthError::Validation(fields))
        | AppError::Checkout(CheckoutError::Validation(fields)) => print_field_errors(fields),
        _ => eprintln!("error: {err}"),
    }
}

fn print_field_errors(fields: &FieldErrors) {
    eprintln!("error: please fix the following");
    for (field, message) in fields.iter() {
        eprintln!("  {field}: {message}");
    }
}
