use std::future::Future;

use futures::future::{select, Either};
use gloo_timers::future::TimeoutFuture;

/// Catalog requests give up after this long and show the data-unavailable state.
pub const CATALOG_TIMEOUT_MS: u32 = 10_000;
/// The map library gets a little longer since it pulls script and tiles.
pub const MAP_LOAD_TIMEOUT_MS: u32 = 15_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed {
    pub millis: u32,
}

impl Elapsed {
    pub fn seconds(self) -> u32 {
        self.millis / 1000
    }
}

/// Race `fut` against a browser timer. The losing future is dropped.
pub async fn with_timeout<F: Future>(millis: u32, fut: F) -> Result<F::Output, Elapsed> {
    let fut = Box::pin(fut);
    let timer = TimeoutFuture::new(millis);
    match select(fut, timer).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(_) => Err(Elapsed { millis }),
    }
}
