//! # Signal logging built on the stateful peek.
//!
//! [`logged`] wraps a source so that every signal is reported through
//! `tracing`, numbered by a per-subscription sequence counter.
//!
//! ## Example output
//! ```text
//! INFO on_next operator="numbers" seq=1 item=1
//! INFO on_next operator="numbers" seq=2 item=2
//! INFO on_complete operator="numbers" seq=3
//! ```

use std::borrow::Cow;
use std::fmt::Debug;
use std::sync::Arc;

use crate::{error::BuildError, reactive::Publisher};

use super::operator::StatefulPeek;

/// Wraps `source` with hooks that log each signal.
///
/// The state is the number of signals seen so far by one subscription.
///
/// # Errors
/// Never fails for a present source; the result mirrors [`StatefulPeek::builder`].
pub fn logged<T>(
    source: Arc<dyn Publisher<T>>,
    name: impl Into<Cow<'static, str>>,
) -> Result<StatefulPeek<T, u64>, BuildError>
where
    T: Debug + Send + 'static,
{
    let name: Cow<'static, str> = name.into();
    let (next_name, error_name, complete_name) = (name.clone(), name.clone(), name.clone());

    StatefulPeek::<T, u64>::builder()
        .source(source)
        .name(name)
        .seed(|| Ok(0))
        .on_next(move |item, seq| {
            let seq = bump(seq);
            tracing::info!(operator = %next_name, seq, item = ?item, "on_next");
            Ok(())
        })
        .on_error(move |err, seq| {
            let seq = bump(seq);
            tracing::warn!(operator = %error_name, seq, error = %err, "on_error");
            Ok(())
        })
        .on_complete(move |seq| {
            let seq = bump(seq);
            tracing::info!(operator = %complete_name, seq, "on_complete");
            Ok(())
        })
        .build()
}

fn bump(seq: Option<&mut u64>) -> u64 {
    match seq {
        Some(seq) => {
            *seq += 1;
            *seq
        }
        None => 0,
    }
}
