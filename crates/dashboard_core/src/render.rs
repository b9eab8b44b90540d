//! Pure projection of the session into the sections the dashboard shows.
//!
//! Shells call [`render`] after every transition and draw whatever comes back;
//! no section decides anything on its own.

use serde::{Deserialize, Serialize};
use shared::{domain::ReasoningStatus, protocol::AnalysisResult};

use crate::{
    approval,
    scale::bar_width,
    store::{AnalysisResultStore, SessionView},
};

pub const APP_TITLE: &str = "RFP-Zero Command Center";
pub const APP_SUBTITLE: &str = "Autonomous Technical & Commercial Analysis";
pub const UPLOAD_CAPTION: &str = "Upload Tender Document";
pub const LOADING_CAPTION: &str = "Running Pattern Recognition...";
pub const PRODUCT_HEADING: &str = "Recommended SKU";
pub const PRICE_UNIT: &str = " / Liter";
pub const PRICE_PANEL_TITLE: &str = "Market Price Analysis";
pub const SELECTED_CAPTION: &str = "Selected (Best Value)";
pub const PREMIUM_ALTERNATIVE_LABEL: &str = "Premium Alternative";
pub const MARKET_HIGH_LABEL: &str = "Market High";
pub const GENERATE_LABEL: &str = "Generate Proposal";
pub const RESET_LABEL: &str = "Analyze Another Document";

/// Reference prices drawn next to the recommendation. Not derived from the
/// analysis result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferencePrices {
    pub premium_alternative: f64,
    pub market_high: f64,
}

impl Default for ReferencePrices {
    fn default() -> Self {
        Self {
            premium_alternative: 450.0,
            market_high: 850.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Success,
    Warning,
}

impl Tone {
    /// Success only for an optimal match.
    pub fn for_result(result: &AnalysisResult) -> Self {
        if result.is_optimal_match() {
            Tone::Success
        } else {
            Tone::Warning
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub body: ViewBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum ViewBody {
    Upload(UploadPanel),
    Result(ResultPanel),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadPanel {
    pub loading: bool,
    pub caption: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPanel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<ImpactBanner>,
    pub product: ProductCard,
    pub compliance: Vec<ComplianceRow>,
    pub prices: PricePanel,
    pub proposal: ProposalAction,
    pub reset_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactBanner {
    pub tone: Tone,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub heading: &'static str,
    pub name: String,
    pub description: String,
    pub price_label: String,
    pub unit_label: &'static str,
    pub compliance_label: String,
    pub compliance_tone: Tone,
    pub rejected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceRow {
    pub status: ReasoningStatus,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePanel {
    pub title: &'static str,
    pub bars: [PriceBar; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarKind {
    Selected,
    Reference,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBar {
    pub kind: BarKind,
    pub label: String,
    pub price: f64,
    pub price_label: String,
    pub width_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ProposalAction {
    Generate { label: &'static str },
    Unavailable { reason: String },
    Generated { message: String },
}

pub fn render(store: &AnalysisResultStore, prices: &ReferencePrices) -> DashboardView {
    let body = match store.view() {
        SessionView::Idle => ViewBody::Upload(UploadPanel {
            loading: false,
            caption: UPLOAD_CAPTION,
        }),
        SessionView::Loading => ViewBody::Upload(UploadPanel {
            loading: true,
            caption: LOADING_CAPTION,
        }),
        SessionView::Result(result) => {
            let proposal = match approval::check_approvable(result) {
                Ok(()) => ProposalAction::Generate {
                    label: GENERATE_LABEL,
                },
                Err(err) => ProposalAction::Unavailable {
                    reason: err.to_string(),
                },
            };
            ViewBody::Result(result_panel(result, prices, proposal))
        }
        SessionView::Approved { result, message } => {
            let proposal = ProposalAction::Generated {
                message: message.to_string(),
            };
            ViewBody::Result(result_panel(result, prices, proposal))
        }
    };

    DashboardView {
        title: APP_TITLE,
        subtitle: APP_SUBTITLE,
        body,
    }
}

fn result_panel(
    result: &AnalysisResult,
    prices: &ReferencePrices,
    proposal: ProposalAction,
) -> ResultPanel {
    let tone = Tone::for_result(result);
    let product = &result.recommended_product;

    ResultPanel {
        banner: result.impact_text().map(|text| ImpactBanner {
            tone,
            text: text.to_string(),
        }),
        product: ProductCard {
            heading: PRODUCT_HEADING,
            name: product.name.clone(),
            description: product.description.clone(),
            price_label: price_label(product.price_per_liter),
            unit_label: PRICE_UNIT,
            compliance_label: format!("{}% Technical Compliance", result.match_score),
            compliance_tone: tone,
            rejected: result.is_rejected(),
        },
        compliance: result
            .reasoning
            .iter()
            .map(|entry| ComplianceRow {
                status: entry.status,
                text: entry.msg.clone(),
            })
            .collect(),
        prices: price_panel(result, prices),
        proposal,
        reset_label: RESET_LABEL,
    }
}

fn price_panel(result: &AnalysisResult, prices: &ReferencePrices) -> PricePanel {
    let recommended = result.recommended_product.price_per_liter;
    let bar = |kind, label: &str, price: f64, caption| PriceBar {
        kind,
        label: label.to_string(),
        price,
        price_label: price_label(price),
        width_percent: bar_width(price, recommended),
        caption,
    };

    PricePanel {
        title: PRICE_PANEL_TITLE,
        bars: [
            bar(
                BarKind::Selected,
                &result.recommended_product.name,
                recommended,
                Some(SELECTED_CAPTION),
            ),
            bar(
                BarKind::Reference,
                PREMIUM_ALTERNATIVE_LABEL,
                prices.premium_alternative,
                None,
            ),
            bar(
                BarKind::Reference,
                MARKET_HIGH_LABEL,
                prices.market_high,
                None,
            ),
        ],
    }
}

/// Price as the service sent it: `320` stays `$320`, `320.5` stays `$320.5`.
pub fn price_label(price: f64) -> String {
    format!("${price}")
}
