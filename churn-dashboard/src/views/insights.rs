//! Insights view - precomputed charts with captions

use super::{asset_url, render_page, Page};

pub struct Insight {
    pub title: &'static str,
    pub caption: &'static [&'static str],
    pub image: &'static str,
    pub width: u32,
}

pub const INSIGHTS: &[Insight] = &[
    Insight {
        title: "Distribution of customer's gender",
        caption: &["There are more male customers in the company."],
        image: "visualization/Gender.PNG",
        width: 400,
    },
    Insight {
        title: "Distribution of customer's subscription type",
        caption: &["There is a close balance of customers among the three subscription types: Standard, Premium, and Basic."],
        image: "visualization/customer subscription.PNG",
        width: 400,
    },
    Insight {
        title: "Distribution of customer's contract length",
        caption: &["Annual and quarterly contracts have similar and the highest number of customer counts, followed by monthly contracts with the lowest number of customers."],
        image: "visualization/Contract.PNG",
        width: 400,
    },
    Insight {
        title: "Distribution of customer's age (years)",
        caption: &["Most customers are aged 40-50 with age 50 being the most common. There's very low number of customers of age 51 and above."],
        image: "visualization/Age.PNG",
        width: 500,
    },
    Insight {
        title: "Distribution of customer's support calls",
        caption: &["On average, customers tend to make 3 support calls in a month. Customers tend to make 1 or 2 support calls per month, with the most make no support calls at all."],
        image: "visualization/calls.PNG",
        width: 500,
    },
    Insight {
        title: "Gender wise churn rate",
        caption: &[
            "Gender and churn rate have a relationship.",
            "Female customers exhibit a slightly higher churn rate compared to male customers. Active male customers (non-churned) is nearly double that of female customers.",
        ],
        image: "visualization/gender1.PNG",
        width: 500,
    },
    Insight {
        title: "Churn rate based on payment delays",
        caption: &["Customers who are not churned tend to have higher payment delay days as compared with churned customers till day 20, after which churned customers have payment delays just over 10 times than that of not churned customers."],
        image: "visualization/delay.PNG",
        width: 500,
    },
    Insight {
        title: "Churn rate based on tenures",
        caption: &["Customers with longer tenures are more likely to churn."],
        image: "visualization/tenur.PNG",
        width: 520,
    },
    Insight {
        title: "Customer Support Calls",
        caption: &[
            "Customers with more support calls tend to churn more.",
            "On the contrary, customers who are not churned tend to make much more 0 to 3 customer support calls than churned customers, after which churned customers make significantly more calls.",
        ],
        image: "visualization/support.PNG",
        width: 500,
    },
    Insight {
        title: "Churn rate based on subscription type",
        caption: &[
            "The subscription type does not influence customer churn rate.",
            "Customers who are not churned tend to choose premium or standard subscription type slightly more than basic subscription.",
        ],
        image: "visualization/type.PNG",
        width: 500,
    },
    Insight {
        title: "Churn rate based on contract length",
        caption: &["Customers with quarterly contract lengths have the lowest churn rate, while those with monthly contract lengths exhibit the highest churn rate. Conversely, customers who do not churn overwhelmingly prefer annual and quarterly contracts over monthly contracts."],
        image: "visualization/contractlen.PNG",
        width: 500,
    },
    Insight {
        title: "Correlation between total spend and churn rate",
        caption: &[
            "Customers who churn tend to spend significantly more money than those who don't.",
            "Both churn and not churned customers share common total spending distribution / total spending behavior.",
        ],
        image: "visualization/spend.PNG",
        width: 500,
    },
    Insight {
        title: "Correlation Heatmap between Independent Features and Churn",
        caption: &[
            "Support Calls (0.52): This has the strongest positive correlation with churn. As the number of support calls increases, the likelihood of churn also increases. This indicates that customers who need more support are more likely to leave, possibly due to dissatisfaction.",
            "Payment Delay (0.33): There is a moderate positive correlation between payment delay and churn. Customers who delay their payments are more likely to churn, suggesting financial instability or dissatisfaction with the service.",
            "Last Interaction (0.13): A weak positive correlation, implying that customers who interact with the company after a long time might be at a slightly higher risk of churn.",
            "Age (0.19): There is a weak positive correlation with churn, meaning older customers may be somewhat more likely to churn compared to younger ones.",
            "Usage Frequency (-0.053): This has a weak negative correlation, suggesting that customers who use the service frequently are slightly less likely to churn.",
            "Total Spend (-0.37): A moderate negative correlation indicates that customers who spend more are less likely to churn. High spenders may derive more value from the service, making them more loyal.",
            "Tenure (-0.021): A very weak negative correlation, suggesting that how long a customer has been with the company has almost no impact on churn.",
        ],
        image: "visualization/correlation.PNG",
        width: 700,
    },
];

fn render_insight(number: usize, insight: &Insight) -> String {
    let paragraphs: String = insight
        .caption
        .iter()
        .map(|p| format!("        <p>{}</p>\n", p))
        .collect();

    format!(
        r#"<section class="insight">
    <h3>{number}. {title}</h3>
    <div class="row">
        <div class="wide">
{paragraphs}        </div>
        <div class="narrow"><img src="{src}" width="{width}" alt="{title}"></div>
    </div>
</section>
"#,
        number = number,
        title = insight.title,
        paragraphs = paragraphs,
        src = asset_url(insight.image),
        width = insight.width,
    )
}

pub fn render() -> String {
    let sections: String = INSIGHTS
        .iter()
        .enumerate()
        .map(|(i, insight)| render_insight(i + 1, insight))
        .collect();

    let content = format!(
        r#"<h2>Customer Churn Behavior Analysis</h2>
<p>In this section, you can view visual insights regarding customer churn behavior.</p>
<hr class="divider">
{}"#,
        sections
    );

    render_page(Page::Insights, &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirteen_numbered_charts() {
        assert_eq!(INSIGHTS.len(), 13);

        let html = render();
        assert!(html.contains("<h3>1. Distribution of customer's gender</h3>"));
        assert!(html.contains("<h3>13. Correlation Heatmap between Independent Features and Churn</h3>"));
        assert_eq!(html.matches("<img ").count(), 13);
    }

    #[test]
    fn test_chart_images_are_static_urls() {
        let html = render();
        assert!(html.contains(r#"src="/static/visualization/customer%20subscription.PNG" width="400""#));
        assert!(html.contains(r#"src="/static/visualization/correlation.PNG" width="700""#));
    }
}
