//! Cart expansion into individually fulfillable ticket units.

use super::payment_event::CartLine;

/// One individual ticket instance within a cart line.
///
/// Units are ephemeral: they exist only for the duration of fulfillment.
/// Their identity materializes in the generated artifact and sent email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketUnit {
    /// Machine name of the ticket type.
    pub ticket_type: String,

    /// Human-readable ticket name.
    pub display_name: String,

    /// Zero-based position of this unit within its cart line.
    pub index_in_line: u32,
}

/// Expands a cart into a flat sequence of units.
///
/// Each line yields exactly `quantity` units, in line order then index
/// order. A zero-quantity line yields no units. Pure and deterministic.
pub fn expand_cart(cart: &[CartLine]) -> Vec<TicketUnit> {
    cart.iter()
        .flat_map(|line| {
            (0..line.quantity).map(|index| TicketUnit {
                ticket_type: line.ticket_type.clone(),
                display_name: line.display_name.clone(),
                index_in_line: index,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(ticket_type: &str, quantity: u32, name: &str) -> CartLine {
        CartLine {
            ticket_type: ticket_type.to_string(),
            quantity,
            display_name: name.to_string(),
        }
    }

    #[test]
    fn empty_cart_yields_no_units() {
        assert!(expand_cart(&[]).is_empty());
    }

    #[test]
    fn single_line_yields_quantity_units() {
        let units = expand_cart(&[line("regular", 3, "Regular Ticket")]);

        assert_eq!(units.len(), 3);
        for (i, unit) in units.iter().enumerate() {
            assert_eq!(unit.ticket_type, "regular");
            assert_eq!(unit.display_name, "Regular Ticket");
            assert_eq!(unit.index_in_line, i as u32);
        }
    }

    #[test]
    fn zero_quantity_line_yields_no_units() {
        let units = expand_cart(&[
            line("regular", 0, "Regular Ticket"),
            line("vip", 1, "VIP Ticket"),
        ]);

        assert_eq!(units.len(), 1);
        assert_eq!(units[0].ticket_type, "vip");
        assert_eq!(units[0].index_in_line, 0);
    }

    #[test]
    fn lines_expand_in_order() {
        let units = expand_cart(&[
            line("regular", 2, "Regular Ticket"),
            line("vip", 2, "VIP Ticket"),
        ]);

        let types: Vec<&str> = units.iter().map(|u| u.ticket_type.as_str()).collect();
        assert_eq!(types, vec!["regular", "regular", "vip", "vip"]);

        let indices: Vec<u32> = units.iter().map(|u| u.index_in_line).collect();
        assert_eq!(indices, vec![0, 1, 0, 1]);
    }

    #[test]
    fn duplicate_type_lines_expand_independently() {
        let units = expand_cart(&[
            line("regular", 1, "Regular Ticket"),
            line("regular", 2, "Regular Ticket"),
        ]);

        assert_eq!(units.len(), 3);
        assert_eq!(units[0].index_in_line, 0);
        assert_eq!(units[1].index_in_line, 0);
        assert_eq!(units[2].index_in_line, 1);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn unit_count_equals_sum_of_quantities(
                quantities in proptest::collection::vec(0u32..20, 0..8)
            ) {
                let cart: Vec<CartLine> = quantities
                    .iter()
                    .enumerate()
                    .map(|(i, &q)| CartLine {
                        ticket_type: format!("type{i}"),
                        quantity: q,
                        display_name: format!("Type {i}"),
                    })
                    .collect();

                let units = expand_cart(&cart);
                let expected: u32 = quantities.iter().sum();
                prop_assert_eq!(units.len() as u32, expected);
            }

            #[test]
            fn line_order_is_preserved(
                quantities in proptest::collection::vec(1u32..5, 1..6)
            ) {
                let cart: Vec<CartLine> = quantities
                    .iter()
                    .enumerate()
                    .map(|(i, &q)| CartLine {
                        ticket_type: format!("type{i}"),
                        quantity: q,
                        display_name: format!("Type {i}"),
                    })
                    .collect();

                let units = expand_cart(&cart);

                // Types appear as contiguous runs in cart order, with
                // ascending indices within each run.
                let mut cursor = 0usize;
                for (i, &q) in quantities.iter().enumerate() {
                    for index in 0..q {
                        prop_assert_eq!(&units[cursor].ticket_type, &format!("type{i}"));
                        prop_assert_eq!(units[cursor].index_in_line, index);
                        cursor += 1;
                    }
                }
            }
        }
    }
}
