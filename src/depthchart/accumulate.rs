//! Cumulative depth curves

use rust_decimal::Decimal;

use super::PriceVolume;
use crate::orderbook::Offer;

/// Build the cumulative step curve for offers sorted best to worst.
///
/// Each distinct price yields one point holding the running base amount;
/// consecutive offers at the same price are merged into a single point.
pub fn accumulate(offers: &[Offer]) -> Vec<PriceVolume> {
    let mut points: Vec<PriceVolume> = Vec::with_capacity(offers.len());
    let mut total = Decimal::ZERO;

    for offer in offers {
        total += offer.base_amount;
        match points.last_mut() {
            Some(last) if last.price == offer.price => last.volume += offer.base_amount,
            _ => points.push(PriceVolume::new(offer.price, total)),
        }
    }

    points
}
