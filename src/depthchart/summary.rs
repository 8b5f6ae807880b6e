//! Order summary at the limit price

use rust_decimal::Decimal;

use super::{to_f64, AmountCost, DepthChartVolumes, PriceVolume, Summary};
use crate::orderbook::Side;

/// Volume reachable at or better than `price` on a `side` curve, and its
/// price-weighted cost.
///
/// Each point contributes its price times the volume it adds over the
/// previous point; the first point contributes its full volume.
pub fn amount_and_cost(curve: &[PriceVolume], side: Side, price: Decimal) -> (Decimal, Decimal) {
    let mut amount = Decimal::ZERO;
    let mut total_cost = Decimal::ZERO;

    for point in curve.iter().take_while(|p| side.is_at_or_better(p.price, price)) {
        total_cost += point.price * (point.volume - amount);
        amount = point.volume;
    }

    (amount, total_cost)
}

fn amount_cost(curve: Option<&Vec<PriceVolume>>, side: Side, price: Decimal) -> AmountCost {
    let (amount, total_cost) = curve
        .map(|c| amount_and_cost(c, side, price))
        .unwrap_or_default();
    AmountCost {
        amount: to_f64(amount),
        total_cost: to_f64(total_cost),
    }
}

/// Summary of the book before and after the order at `price`
///
/// "For sale" reads the sell curves, "wanted" the buy curves. Must be called
/// before chart extender points are appended.
pub fn summarize(volumes: &DepthChartVolumes<PriceVolume>, price: Decimal) -> Summary {
    Summary {
        price: to_f64(price),
        current_for_sale: amount_cost(volumes.sells_before.as_ref(), Side::Sell, price),
        current_wanted: amount_cost(volumes.buys_before.as_ref(), Side::Buy, price),
        after_order_for_sale: amount_cost(volumes.sells_after.as_ref(), Side::Sell, price),
        after_order_wanted: amount_cost(volumes.buys_after.as_ref(), Side::Buy, price),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sells_before() -> Vec<PriceVolume> {
        vec![
            PriceVolume::new(dec!(140), dec!(7)),
            PriceVolume::new(dec!(142), dec!(15)),
            PriceVolume::new(dec!(150), dec!(26)),
            PriceVolume::new(dec!(160), dec!(27)),
        ]
    }

    #[test]
    fn test_cost_is_price_weighted() {
        let (amount, cost) = amount_and_cost(&sells_before(), Side::Sell, dec!(142));
        assert_eq!(amount, dec!(15));
        assert_eq!(cost, dec!(7) * dec!(140) + dec!(8) * dec!(142));
    }

    #[test]
    fn test_nothing_reachable() {
        let (amount, cost) = amount_and_cost(&sells_before(), Side::Sell, dec!(139.99));
        assert_eq!(amount, dec!(0));
        assert_eq!(cost, dec!(0));
    }

    #[test]
    fn test_buy_curve_reads_downwards() {
        let buys = vec![
            PriceVolume::new(dec!(120), dec!(5)),
            PriceVolume::new(dec!(110), dec!(14)),
            PriceVolume::new(dec!(100), dec!(31)),
        ];
        let (amount, cost) = amount_and_cost(&buys, Side::Buy, dec!(105));
        assert_eq!(amount, dec!(14));
        assert_eq!(cost, dec!(600) + dec!(990));
    }

    #[test]
    fn test_summarize_missing_curves() {
        let volumes = DepthChartVolumes {
            sells_before: Some(sells_before()),
            ..Default::default()
        };
        let summary = summarize(&volumes, dec!(150));
        assert_eq!(summary.price, 150.0);
        assert_eq!(summary.current_for_sale.amount, 26.0);
        assert_eq!(summary.current_for_sale.total_cost, 980.0 + 1136.0 + 1650.0);
        assert_eq!(summary.after_order_wanted, AmountCost::default());
    }
}
