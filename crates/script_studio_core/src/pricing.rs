//! crates/script_studio_core/src/pricing.rs
//!
//! The static plan catalog behind the pricing view. Choosing a plan is an
//! unconditional switch on the session; nothing here handles payment.

use crate::domain::Plan;

#[derive(Debug, Clone, PartialEq)]
pub struct PlanFeature {
    pub text: &'static str,
    pub included: bool,
}

/// One column of the pricing table.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOffer {
    pub plan: Plan,
    pub display_name: &'static str,
    pub price: &'static str,
    pub period: &'static str,
    pub popular: bool,
    pub features: Vec<PlanFeature>,
}

fn features(entries: &[(&'static str, bool)]) -> Vec<PlanFeature> {
    entries
        .iter()
        .map(|&(text, included)| PlanFeature { text, included })
        .collect()
}

pub fn plan_offer(plan: Plan) -> PlanOffer {
    match plan {
        Plan::Free => PlanOffer {
            plan,
            display_name: "Free",
            price: "0",
            period: "forever",
            popular: false,
            features: features(&[
                ("5 scripts per month", true),
                ("Basic script templates", true),
                ("Community support", true),
                ("Video caption editor", false),
                ("High-quality downloads", false),
                ("No watermarks", false),
                ("Priority support", false),
            ]),
        },
        Plan::Weekly => PlanOffer {
            plan,
            display_name: "Weekly",
            price: "2",
            period: "week",
            popular: false,
            features: features(&[
                ("50 scripts per week", true),
                ("Advanced script templates", true),
                ("Email support", true),
                ("Basic video editor", true),
                ("High-quality downloads", true),
                ("Small watermark", true),
                ("Priority support", false),
            ]),
        },
        Plan::Monthly => PlanOffer {
            plan,
            display_name: "Monthly Pro",
            price: "4.99",
            period: "month",
            popular: true,
            features: features(&[
                ("Unlimited scripts", true),
                ("All script templates", true),
                ("Priority support", true),
                ("Full video editor", true),
                ("4K downloads", true),
                ("No watermarks", true),
                ("Advanced analytics", true),
            ]),
        },
    }
}

/// Every offer, in display order.
pub fn plan_catalog() -> Vec<PlanOffer> {
    Plan::ALL.into_iter().map(plan_offer).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lists_plans_in_order() {
        let plans: Vec<Plan> = plan_catalog().iter().map(|o| o.plan).collect();
        assert_eq!(plans, vec![Plan::Free, Plan::Weekly, Plan::Monthly]);
    }

    #[test]
    fn only_monthly_is_popular() {
        let popular: Vec<Plan> = plan_catalog()
            .into_iter()
            .filter(|o| o.popular)
            .map(|o| o.plan)
            .collect();
        assert_eq!(popular, vec![Plan::Monthly]);
    }

    #[test]
    fn free_offer_excludes_editor() {
        let free = plan_offer(Plan::Free);
        let editor = free
            .features
            .iter()
            .find(|f| f.text == "Video caption editor")
            .unwrap();
        assert!(!editor.included);
    }
}
