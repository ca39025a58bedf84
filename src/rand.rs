use ::rand::distributions::{Distribution, Standard};
use ::rand::{thread_rng, Rng};

use crate::arithmetic;
use crate::currency::round_money;
use crate::handlers::handle_calculation;
use crate::types::{CalculationRequest, CurrencyFloat, Payment, PaymentCurrency, RequestRecord};

const MIN_AMOUNT: CurrencyFloat = 0.01;

impl Distribution<PaymentCurrency> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PaymentCurrency {
        if rng.gen_bool(0.5) {
            PaymentCurrency::Local
        } else {
            PaymentCurrency::Foreign
        }
    }
}

struct RequestGenerator {
    generated: usize,
    num_requests: Option<usize>,
    max_rate: CurrencyFloat,
    max_products: usize,
    max_price: CurrencyFloat,
    max_attempts: usize,
}

impl RequestGenerator {
    fn new(
        num_requests: Option<usize>,
        max_rate: CurrencyFloat,
        max_products: usize,
        max_price: CurrencyFloat,
        max_attempts: usize,
    ) -> Self {
        Self {
            generated: 0,
            num_requests,
            max_rate,
            max_products,
            max_price,
            max_attempts,
        }
    }

    /// Random amount in `[MIN_AMOUNT, max)`, already on the cent grid
    fn amount<R: Rng>(rng: &mut R, max: CurrencyFloat) -> CurrencyFloat {
        if max <= MIN_AMOUNT {
            return MIN_AMOUNT;
        }
        round_money(rng.gen_range(MIN_AMOUNT..max))
    }

    fn generate_potential_request(&self) -> CalculationRequest {
        let mut rng = thread_rng();

        let exchange_rate = Self::amount(&mut rng, self.max_rate);
        let num_products = rng.gen_range(1..=self.max_products.max(1));
        let product_prices: Vec<_> = (0..num_products)
            .map(|_| Self::amount(&mut rng, self.max_price))
            .collect();

        // The amount due carries a markup of up to 50% over the original prices
        let original_total = arithmetic::sum(product_prices.iter().copied());
        let markup = round_money(original_total * rng.gen_range(0.0..0.5));
        let total_amount = arithmetic::add(original_total, markup);

        let payment = match rng.gen::<PaymentCurrency>() {
            PaymentCurrency::Local => Payment::Local,
            PaymentCurrency::Foreign => {
                // Overpay by up to one unit of foreign currency per 10 due
                let foreign_total = round_money(total_amount / exchange_rate);
                let extra = round_money(rng.gen_range(0.0..=foreign_total / 10.0 + 1.0));
                Payment::Foreign {
                    tendered: arithmetic::add(foreign_total, extra),
                }
            }
        };

        CalculationRequest {
            exchange_rate,
            total_amount,
            payment,
            product_prices,
        }
    }
}

impl Iterator for RequestGenerator {
    type Item = RequestRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(desired) = self.num_requests {
            // Maybe break early
            if self.generated >= desired {
                return None;
            }
        }

        for _ in 0..self.max_attempts {
            let request = self.generate_potential_request();
            match handle_calculation(request.clone()) {
                Ok(_) => {
                    self.generated += 1;
                    return Some(request.into());
                }
                Err(err) => log::debug!("Discarding generated request: {}", err),
            }
        }

        log::error!("Reached max attempts to generate new request.");

        None
    }
}

/// Endless (or `num_requests` long) sequence of requests that all calculate successfully.
pub fn generate_random_valid_request_sequence(
    num_requests: Option<usize>,
    max_rate: CurrencyFloat,
    max_products: usize,
    max_price: CurrencyFloat,
    max_attempts: usize,
) -> impl Iterator<Item = RequestRecord> {
    RequestGenerator::new(num_requests, max_rate, max_products, max_price, max_attempts)
}
