//! Predict view - customer form and the result banner

use churn_core::constants::{
    AGE_MAX, LAST_INTERACTION_MAX, PAYMENT_DELAY_MAX, SUPPORT_CALLS_MAX, TENURE_MAX,
    TOTAL_SPEND_STEP, USAGE_FREQUENCY_MAX,
};
use churn_core::{ChurnLabel, ContractLength, Gender, SubscriptionType};

use super::{asset_url, html_escape, render_page, Page};
use crate::models::PredictRequest;

/// Banner text for a predicted class
pub fn banner_message(label: ChurnLabel) -> &'static str {
    match label {
        ChurnLabel::Churned => "The customer has churned",
        ChurnLabel::NotChurned => "The customer has not churned",
    }
}

/// Background color and text, always chosen together
pub fn banner_style(label: ChurnLabel) -> (&'static str, &'static str) {
    match label {
        ChurnLabel::Churned => ("red", banner_message(label)),
        ChurnLabel::NotChurned => ("green", banner_message(label)),
    }
}

pub fn result_banner(label: ChurnLabel, confidence_display: &str) -> String {
    let (color, message) = banner_style(label);
    format!(
        r#"<div class="banner" style="background-color: {};">Prediction: {}<br>Confidence: {}</div>"#,
        color,
        message,
        html_escape(confidence_display)
    )
}

pub fn error_banner(message: &str) -> String {
    format!(r#"<div class="banner error">{}</div>"#, html_escape(message))
}

fn number_input(name: &str, label: &str, value: u32, max: u32) -> String {
    format!(
        r#"    <label for="{name}">{label}</label>
    <input type="number" id="{name}" name="{name}" min="0" max="{max}" step="1" value="{value}">
"#
    )
}

fn select_input<T: Copy + PartialEq>(
    name: &str,
    label: &str,
    options: &[T],
    selected: T,
    text: impl Fn(T) -> &'static str,
) -> String {
    let options: String = options
        .iter()
        .map(|&option| {
            let attr = if option == selected { " selected" } else { "" };
            format!(
                "        <option value=\"{0}\"{1}>{0}</option>\n",
                text(option),
                attr
            )
        })
        .collect();

    format!(
        r#"    <label for="{name}">{label}</label>
    <select id="{name}" name="{name}">
{options}    </select>
"#
    )
}

/// Render the form filled with `values`, plus an optional banner below it
pub fn render(values: &PredictRequest, banner: Option<&str>) -> String {
    let mut fields = String::new();
    fields.push_str(&number_input("age", "Age", values.age, AGE_MAX));
    fields.push_str(&select_input("gender", "Gender", &Gender::ALL, values.gender, Gender::label));
    fields.push_str(&number_input("tenure", "Tenure (in months)", values.tenure, TENURE_MAX));
    fields.push_str(&number_input(
        "usage_frequency",
        "Usage Frequency (in the last month)",
        values.usage_frequency,
        USAGE_FREQUENCY_MAX,
    ));
    fields.push_str(&number_input(
        "support_calls",
        "Support Calls (in the last month)",
        values.support_calls,
        SUPPORT_CALLS_MAX,
    ));
    fields.push_str(&number_input(
        "payment_delay",
        "Payment Delay (in days)",
        values.payment_delay,
        PAYMENT_DELAY_MAX,
    ));
    fields.push_str(&select_input(
        "subscription_type",
        "Subscription Type",
        &SubscriptionType::ALL,
        values.subscription_type,
        SubscriptionType::label,
    ));
    fields.push_str(&select_input(
        "contract_length",
        "Contract Length",
        &ContractLength::ALL,
        values.contract_length,
        ContractLength::label,
    ));
    fields.push_str(&format!(
        r#"    <label for="total_spend">Total Spend</label>
    <input type="number" id="total_spend" name="total_spend" min="0" step="{}" value="{}">
"#,
        TOTAL_SPEND_STEP, values.total_spend
    ));
    fields.push_str(&number_input(
        "last_interaction",
        "Last Interaction (days ago)",
        values.last_interaction,
        LAST_INTERACTION_MAX,
    ));

    let content = format!(
        r#"<img class="header-image" src="{header}" width="1100" alt="Customer churn">
<h1>Customer Behavior Prediction</h1>
<h3>Enter Customer Details:</h3>
<form class="predict" method="post" action="/predict">
{fields}    <button type="submit">Predict</button>
</form>
<br>
{banner}"#,
        header = asset_url("image.png"),
        fields = fields,
        banner = banner.unwrap_or(""),
    );

    render_page(Page::Predict, &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_color_matches_text() {
        assert_eq!(banner_style(ChurnLabel::Churned), ("red", "The customer has churned"));
        assert_eq!(banner_style(ChurnLabel::NotChurned), ("green", "The customer has not churned"));
    }

    #[test]
    fn test_result_banner() {
        let html = result_banner(ChurnLabel::Churned, "91.23%");
        assert_eq!(
            html,
            r#"<div class="banner" style="background-color: red;">Prediction: The customer has churned<br>Confidence: 91.23%</div>"#
        );

        let html = result_banner(ChurnLabel::NotChurned, "75.00%");
        assert!(html.contains("background-color: green;"));
        assert!(html.contains("Prediction: The customer has not churned"));
    }

    #[test]
    fn test_form_defaults() {
        let html = render(&PredictRequest::default(), None);
        assert!(html.contains("<h1>Customer Behavior Prediction</h1>"));
        assert!(html.contains(r#"name="age" min="0" max="120" step="1" value="30""#));
        assert!(html.contains(r#"name="support_calls" min="0" max="50" step="1" value="3""#));
        assert!(html.contains(r#"name="total_spend" min="0" step="0.1" value="500""#));
        assert!(html.contains(r#"<option value="Male" selected>Male</option>"#));
        assert!(html.contains(r#"<option value="Standard" selected>Standard</option>"#));
        assert!(html.contains(r#"<option value="Monthly" selected>Monthly</option>"#));
        assert!(html.contains(r#"<option value="Quarterly">Quarterly</option>"#));
        assert!(!html.contains("class=\"banner"));
    }

    #[test]
    fn test_form_keeps_submitted_values() {
        let values = PredictRequest {
            gender: Gender::Female,
            contract_length: ContractLength::Annual,
            ..Default::default()
        };
        let banner = error_banner("Invalid input: age must be between 0 and 120");
        let html = render(&values, Some(&banner));
        assert!(html.contains(r#"<option value="Female" selected>Female</option>"#));
        assert!(html.contains(r#"<option value="Annual" selected>Annual</option>"#));
        assert!(html.contains(r#"<div class="banner error">Invalid input: age must be between 0 and 120</div>"#));
    }
}
