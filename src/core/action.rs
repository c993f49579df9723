//! # Actions
//!
//! Everything that can happen in kurs becomes an `Action`.
//! User types a digit? That's `Action::AmountInput`.
//! The fetch task finishes? That's `Action::ConversionReady`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an `Effect` describing the I/O the event loop must run.
//! No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Supersession works in two layers. Every input change bumps
//! `App::request_seq` and returns an effect that aborts the in-flight fetch
//! task; the sequence number additionally makes any late completion inert, so
//! a stale response can never overwrite the result even if an abort races its
//! delivery.

use log::{debug, info};

use crate::core::currency::Currency;
use crate::core::state::{App, Outcome};
use crate::rates::{Conversion, ConversionRequest};

/// A fetch the event loop should spawn, tagged with the sequence number its
/// completion must carry back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingFetch {
    pub request: ConversionRequest,
    pub seq: u64,
}

#[derive(Debug)]
pub enum Action {
    /// The amount field changed; carries the raw text.
    AmountInput(String),
    SetFrom(Currency),
    SetTo(Currency),
    /// Re-run the recomputation with current inputs (startup, Ctrl+R).
    Refresh,
    /// Background fetch settled successfully.
    ConversionReady { seq: u64, conversion: Conversion },
    /// Background fetch failed.
    ConversionFailed { seq: u64, message: String },
    Quit,
}

/// Side effects the event loop executes after `update` returns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    None,
    /// Abort the in-flight fetch task, then spawn this one.
    Fetch(PendingFetch),
    /// Abort the in-flight fetch task; nothing replaces it.
    Cancel,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::AmountInput(text) => {
            app.amount_text = text;
            recompute(app)
        }
        Action::SetFrom(currency) => {
            app.from = currency;
            recompute(app)
        }
        Action::SetTo(currency) => {
            app.to = currency;
            recompute(app)
        }
        Action::Refresh => recompute(app),
        Action::ConversionReady { seq, conversion } => {
            if seq != app.request_seq {
                debug!(
                    "Dropping stale conversion (seq={}, current={})",
                    seq, app.request_seq
                );
                return Effect::None;
            }
            info!(
                "Conversion settled: {} {} (seq={}, as of {})",
                conversion.value, conversion.to, seq, conversion.as_of
            );
            app.outcome = Outcome::Converted {
                value: conversion.value,
                to: conversion.to,
            };
            app.as_of = Some(conversion.as_of);
            app.is_loading = false;
            app.status_message = format!("rates as of {}", conversion.as_of);
            Effect::None
        }
        Action::ConversionFailed { seq, message } => {
            if seq != app.request_seq {
                debug!(
                    "Dropping stale failure (seq={}, current={}): {}",
                    seq, app.request_seq, message
                );
                return Effect::None;
            }
            app.outcome = Outcome::Failed(message.clone());
            app.is_loading = false;
            app.status_message = message;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// The reactive recomputation: runs on every change to amount, from, or to.
/// Always supersedes whatever is in flight, whether or not a new fetch is
/// issued.
fn recompute(app: &mut App) -> Effect {
    app.request_seq += 1;

    let Some(amount) = app.parsed_amount() else {
        app.outcome = Outcome::InvalidAmount;
        app.is_loading = false;
        app.status_message = String::from("enter a valid amount");
        return Effect::Cancel;
    };

    // The upstream API rejects identical source/target currencies, so that
    // case settles locally without a request.
    if app.from == app.to {
        app.outcome = Outcome::Converted {
            value: amount,
            to: app.to,
        };
        app.is_loading = false;
        app.status_message.clear();
        return Effect::Cancel;
    }

    app.is_loading = true;
    Effect::Fetch(PendingFetch {
        request: ConversionRequest {
            amount,
            from: app.from,
            to: app.to,
        },
        seq: app.request_seq,
    })
}
