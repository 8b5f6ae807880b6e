//! Order matching simulation
//!
//! Computes what the book would look like if a hypothetical order were
//! placed: which opposite-side offers it takes, what is left over, and what
//! would newly rest on its own side. Every step returns new offer lists; the
//! input book is never modified.

use rust_decimal::Decimal;
use tracing::debug;

use crate::orderbook::{MatchType, Offer, OrderBook, Side};

/// Opposite-side offers after an incoming order has taken its fill
#[derive(Debug, Clone, PartialEq)]
pub struct Consumption {
    /// Remaining offers in priority order
    pub offers: Vec<Offer>,
    /// Amount taken from the book
    pub filled: Decimal,
    /// Amount of the incoming order that found no counterparty
    pub remainder: Decimal,
}

/// Walk `opposing` offers in priority order and fill an incoming `side`
/// order of `amount` up to `limit`.
///
/// Partially taken offers come back with their reduced amount, fully taken
/// offers are dropped, everything else passes through unchanged.
pub fn consume_opposite(
    side: Side,
    amount: Decimal,
    limit: Decimal,
    opposing: &[Offer],
) -> Consumption {
    let mut remaining = amount;
    let mut offers = Vec::with_capacity(opposing.len());

    for offer in opposing {
        if remaining > Decimal::ZERO && side.crosses(limit, offer.price) {
            let taken = remaining.min(offer.base_amount);
            remaining -= taken;

            let left = offer.base_amount - taken;
            if left > Decimal::ZERO {
                offers.push(offer.with_base_amount(left));
            }
        } else {
            offers.push(offer.clone());
        }
    }

    Consumption {
        offers,
        filled: amount - remaining,
        remainder: remaining,
    }
}

/// Same-side offers with the unmatched `remainder` resting at `limit`.
///
/// Joins an existing offer at exactly that price, otherwise inserts a
/// synthetic offer and keeps the list in priority order.
pub fn rest_unmatched(
    side: Side,
    remainder: Decimal,
    limit: Decimal,
    same_side: &[Offer],
) -> Vec<Offer> {
    let mut offers = same_side.to_vec();
    if remainder <= Decimal::ZERO {
        return offers;
    }

    match offers.iter_mut().find(|o| o.price == limit) {
        Some(existing) => *existing = existing.with_base_amount(existing.base_amount + remainder),
        None => {
            offers.push(Offer::synthetic(side, limit, remainder));
            offers.sort_by(|a, b| side.priority(&a.price, &b.price));
        }
    }

    offers
}

/// Offers representing only the liquidity the order adds to its own side.
///
/// This is a charting convention rather than book state: the remainder at
/// `limit` is followed by a zero-amount anchor at the side's best price so
/// the accumulated curve draws the new liquidity as its own step. The anchor
/// never sits ahead of `limit`; when it would, it collapses onto `limit` and
/// merges away during accumulation.
pub fn extra_offers(
    side: Side,
    remainder: Decimal,
    limit: Decimal,
    same_side: &[Offer],
) -> Vec<Offer> {
    if remainder <= Decimal::ZERO {
        return Vec::new();
    }

    let anchor = match same_side.first() {
        Some(best) if side.is_better(limit, best.price) => best.price,
        _ => limit,
    };

    vec![
        Offer::synthetic(side, limit, remainder),
        Offer::synthetic(side, anchor, Decimal::ZERO),
    ]
}

/// Result of placing a hypothetical order against a book
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub side: Side,
    pub match_type: MatchType,
    /// Limit actually used for matching; the worst opposite price for direct orders
    pub effective_price: Decimal,
    /// Opposite side after the fill
    pub opposite_after: Vec<Offer>,
    /// Own side with any remainder resting on it
    pub own_after: Vec<Offer>,
    /// Only the liquidity added to the own side
    pub own_extra: Vec<Offer>,
    pub filled: Decimal,
    pub remainder: Decimal,
}

/// Simulate an incoming order of `amount` at `price` on `side`.
///
/// A direct order matches up to the worst price on the opposite side and
/// never rests, so its own side is returned untouched.
pub fn simulate(
    book: &OrderBook,
    side: Side,
    match_type: MatchType,
    amount: Decimal,
    price: Decimal,
) -> MatchOutcome {
    let opposite = book.offers(side.opposite());
    let own = book.offers(side);

    let effective_price = match match_type {
        MatchType::Direct => opposite.last().map(|o| o.price).unwrap_or(price),
        MatchType::LimitOrder => price,
    };

    let consumption = consume_opposite(side, amount, effective_price, opposite);

    let (own_after, own_extra) = match match_type {
        MatchType::LimitOrder => (
            rest_unmatched(side, consumption.remainder, effective_price, own),
            extra_offers(side, consumption.remainder, effective_price, own),
        ),
        MatchType::Direct => (own.to_vec(), Vec::new()),
    };

    debug!(
        %side,
        %match_type,
        %amount,
        %effective_price,
        filled = %consumption.filled,
        remainder = %consumption.remainder,
        "Simulated order"
    );

    MatchOutcome {
        side,
        match_type,
        effective_price,
        opposite_after: consumption.offers,
        own_after,
        own_extra,
        filled: consumption.filled,
        remainder: consumption.remainder,
    }
}
