use rayon::prelude::*;

use crate::{parse_slice_with_options, Bundle, ParseOptions, Result};

/// Parse independent documents on the rayon pool. Results keep input order.
pub fn parse_many(inputs: &[&[u8]], options: &ParseOptions) -> Vec<Result<Bundle>> {
    inputs
        .par_iter()
        .map(|input| parse_slice_with_options(input, options))
        .collect()
}
