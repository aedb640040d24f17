use std::fmt;

use tracing::info;

use crate::error::Result;
use crate::store::CsvStore;
use crate::types::{price_text, Listing};

/// One reported average-price difference between two runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceChange {
    pub model: String,
    /// Display forms; an absent price is the empty string.
    pub old_avr: String,
    pub new_avr: String,
}

impl fmt::Display for PriceChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UPDATED: {} average price {} -> {}",
            self.model,
            show(&self.old_avr),
            show(&self.new_avr)
        )
    }
}

fn show(price: &str) -> &str {
    if price.is_empty() {
        "none"
    } else {
        price
    }
}

/// Key-based diff: each new listing is matched against the prior set by
/// `model`, and a change is emitted when the average price differs.
/// Comparison happens on the display form, so an absent price is unequal to
/// any number and equal to itself. Listings with no prior counterpart are
/// not reported.
pub fn diff(new_listings: &[Listing], prior_listings: &[Listing]) -> Vec<PriceChange> {
    let mut changes = Vec::new();

    for listing in new_listings {
        if let Some(prior) = prior_listings.iter().find(|p| p.model == listing.model) {
            let old_avr = price_text(prior.avr_price);
            let new_avr = price_text(listing.avr_price);
            if old_avr != new_avr {
                changes.push(PriceChange {
                    model: listing.model.clone(),
                    old_avr,
                    new_avr,
                });
            }
        }
    }

    changes
}

/// Loads the prior store, prints one line per average-price change, then
/// unconditionally overwrites the store with the new set. A missing store
/// file skips the diff entirely (first-run bootstrap).
pub fn reconcile_and_save(store: &CsvStore, new_listings: &[Listing]) -> Result<Vec<PriceChange>> {
    let changes = match store.load()? {
        Some(prior_listings) => {
            let changes = diff(new_listings, &prior_listings);
            for change in &changes {
                println!("{change}");
            }
            info!(changes = changes.len(), "Reconciled against prior store");
            changes
        }
        None => {
            info!("No prior store; bootstrapping");
            Vec::new()
        }
    };

    store.save(new_listings)?;
    Ok(changes)
}
