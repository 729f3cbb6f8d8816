//! Home view - what the app does and what the dataset contains

use super::{asset_url, render_page, Page};

/// Dataset columns and their descriptions
const DATASET_COLUMNS: &[(&str, &str)] = &[
    ("CustomerID", "A unique identifier for each customer"),
    ("Age", "The age of the customer"),
    ("Gender", "Gender of the customer"),
    ("Tenure", "Duration in months for which a customer has been using the company's products or services"),
    ("Usage Frequency", "Number of times the customer has used the company's services in the last month"),
    ("Support Calls", "Number of calls the customer has made to customer support in the last month"),
    ("Payment Delay", "Number of days the customer has delayed their payment in the last month"),
    ("Subscription Type", "Type of subscription the customer has chosen"),
    ("Contract Length", "Duration of the contract the customer has signed with the company"),
    ("Total Spend", "Total amount of money the customer has spent on the company's products or services"),
    ("Last Interaction", "Number of days since the last interaction the customer had with the company"),
    ("Churn", "Binary label indicating whether a customer has churned (1) or not (0)"),
];

pub fn render() -> String {
    let columns: String = DATASET_COLUMNS
        .iter()
        .map(|(name, description)| format!("        <li><b>{}:</b> {}</li>\n", name, description))
        .collect();

    let content = format!(
        r#"<section class="row">
    <div class="wide">
        <h2>About this app</h2>
        <div class="lead">
            - Easily predict if a customer is likely to churn or not using our <a class="accent" href="/predict">Customer Churn Predictor</a>.<br>
            - View customer churn behavior using our <a class="accent" href="/insights">Insights</a>.
        </div>
    </div>
    <div class="narrow"><img class="header-image" src="{header}" width="400" alt="Voluntary vs involuntary churn"></div>
</section>

<section class="row">
    <div class="half">
        <h2>What is customer churn?</h2>
        <div class="text">Customer churn occurs when customers stop using a company's products. This can result from various factors.
        Customer features like ratings and usage metrics provide insight into customer behavior, especially when they're about to churn.</div>
    </div>
    <div class="half">
        <h2>Why predict customer churn?</h2>
        <div class="text">It's much more expensive to acquire new customers than to retain existing ones.
        Predicting customer churn and identifying early warning signs can save significant costs for a company.</div>
    </div>
</section>

<hr class="divider">

<h2 style="text-align: center;">About Dataset</h2>
<div class="justify">The churn label indicates whether a customer has churned or not. A churned customer is one who has decided to discontinue their subscription or usage of the company's services.
On the other hand, a non-churned customer is one who continues to remain engaged and retains their relationship with the company.</div>
<div class="justify">The dataset includes customer information such as age, gender, tenure, usage frequency, support calls, payment delay,
subscription type, contract length, total spend, and last interaction details. This information is used to predict whether a customer is likely to churn based on these behaviors.</div>
<div class="justify">These datasets contain {count} feature columns. In detail, these are:<br><br>
    <ul>
{columns}    </ul>
</div>"#,
        header = asset_url("Header - Voluntary vs.png"),
        count = DATASET_COLUMNS.len(),
        columns = columns,
    );

    render_page(Page::Home, &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_lists_every_column() {
        let html = render();
        assert!(html.contains("These datasets contain 12 feature columns"));
        for (name, _) in DATASET_COLUMNS {
            assert!(html.contains(&format!("<b>{}:</b>", name)), "missing {}", name);
        }
        assert!(html.contains("/static/Header%20-%20Voluntary%20vs.png"));
    }
}
