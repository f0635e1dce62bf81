//! The tool catalog shown in the panel's menu.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Menu section a tool belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolCategory {
    Calculators,
    Converters,
    Utilities,
    CxTools,
}

impl ToolCategory {
    /// Categories in menu order.
    pub const ALL: [ToolCategory; 4] = [
        ToolCategory::Calculators,
        ToolCategory::Converters,
        ToolCategory::Utilities,
        ToolCategory::CxTools,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ToolCategory::Calculators => "calculators",
            ToolCategory::Converters => "converters",
            ToolCategory::Utilities => "utilities",
            ToolCategory::CxTools => "cx-tools",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ToolCategory::Calculators => "Calculators",
            ToolCategory::Converters => "Converters",
            ToolCategory::Utilities => "Utilities",
            ToolCategory::CxTools => "CX Tools",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolCategory::Calculators => "Useful for support reps dealing with invoices and pricing",
            ToolCategory::Converters => {
                "Helps when agents or customers use different measurement systems"
            }
            ToolCategory::Utilities => "Quick, context-independent helpers",
            ToolCategory::CxTools => "Tailored for customer support or sales use inside Front",
        }
    }
}

impl fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ToolCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolCategory::ALL
            .into_iter()
            .find(|c| c.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown tool category: {}", s))
    }
}

/// One entry of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tool {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: ToolCategory,
    pub icon: &'static str,
}

const fn tool(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: ToolCategory,
    icon: &'static str,
) -> Tool {
    Tool {
        id,
        name,
        description,
        category,
        icon,
    }
}

use ToolCategory::{Calculators, Converters, CxTools, Utilities};

/// Every tool, in catalog order.
pub const TOOLS: [Tool; 24] = [
    tool("basic-calculator", "Calculator", "Advanced calculator with history and scientific functions", Calculators, "🧮"),
    tool("percentage-calculator", "Percentage Calculator", "For discounts, commissions, or refunds", Calculators, "%"),
    tool("markup-margin-calculator", "Markup/Margin Calculator", "For pricing and profitability checks", Calculators, "💰"),
    tool("tax-calculator", "Tax/VAT Calculator", "Quick total or reverse-tax calculations", Calculators, "🧾"),
    tool("currency-converter", "Currency Converter", "Exchange rates with all conversions at once", Converters, "💱"),
    tool("unit-price-calculator", "Unit Price Calculator", "Cost per unit or weight", Calculators, "📊"),
    tool("length-converter", "Length Converter", "m ↔ ft, cm ↔ in", Converters, "📏"),
    tool("weight-converter", "Weight Converter", "kg ↔ lb", Converters, "⚖️"),
    tool("volume-converter", "Volume Converter", "L ↔ gal, mL ↔ fl oz", Converters, "🥤"),
    tool("temperature-converter", "Temperature Converter", "°C ↔ °F", Converters, "🌡️"),
    tool("area-converter", "Area Converter", "m² ↔ ft²", Converters, "📐"),
    tool("speed-converter", "Speed Converter", "km/h ↔ mph", Converters, "🚗"),
    tool("timezone-converter", "Time Zone Converter", "Show local vs customer time", Converters, "🌍"),
    tool("text-case-converter", "Text Case Converter", "Uppercase, lowercase, title case", Utilities, "🔤"),
    tool("url-encoder-decoder", "URL Encoder/Decoder", "Encode and decode URLs", Utilities, "🔗"),
    tool("json-formatter", "JSON Formatter", "Format and validate JSON", Utilities, "{ }"),
    tool("base64-tool", "Base64 Encoder/Decoder", "Encode and decode Base64", Utilities, "🔐"),
    tool("color-picker", "Color Picker", "HEX ↔ RGB converter", Utilities, "🎨"),
    tool("clipboard-cleaner", "Text Cleaner", "Trim, remove HTML, etc.", Utilities, "📋"),
    tool("response-time-calculator", "Response Time Calculator", "Between two timestamps", CxTools, "⏱️"),
    tool("sla-deadline-estimator", "SLA Deadline Estimator", "Based on working hours", CxTools, "📅"),
    tool("eta-calculator", "ETA Calculator", "Given shipping times or delays", CxTools, "📦"),
    tool("customer-local-time", "Customer Local Time", "Based on their timezone", CxTools, "🕐"),
    tool("snippet-randomizer", "Snippet Randomizer", "Choose from pre-set responses", CxTools, "🎲"),
];

/// Look a tool up by id.
pub fn find_tool(id: &str) -> Option<&'static Tool> {
    TOOLS.iter().find(|t| t.id == id)
}

pub fn tools_in(category: ToolCategory) -> impl Iterator<Item = &'static Tool> {
    TOOLS.iter().filter(move |t| t.category == category)
}

/// A titled group of tools in the menu.
#[derive(Debug, Clone, Serialize)]
pub struct MenuSection {
    /// `"favorites"` or a category id.
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tools: Vec<Tool>,
}

/// Group the catalog for display.
///
/// Favourited tools come first in their own section (catalog order); empty
/// sections are omitted. Favourites still appear under their category.
pub fn build_menu<'a, I>(favorites: I) -> Vec<MenuSection>
where
    I: IntoIterator<Item = &'a str>,
{
    let favorites: Vec<&str> = favorites.into_iter().collect();
    let mut sections = Vec::with_capacity(ToolCategory::ALL.len() + 1);

    let favorite_tools: Vec<Tool> = TOOLS
        .iter()
        .filter(|t| favorites.contains(&t.id))
        .copied()
        .collect();
    if !favorite_tools.is_empty() {
        sections.push(MenuSection {
            id: "favorites".to_string(),
            label: "Favorites".to_string(),
            description: None,
            tools: favorite_tools,
        });
    }

    for category in ToolCategory::ALL {
        let tools: Vec<Tool> = tools_in(category).copied().collect();
        if tools.is_empty() {
            continue;
        }
        sections.push(MenuSection {
            id: category.id().to_string(),
            label: category.label().to_string(),
            description: Some(category.description().to_string()),
            tools,
        });
    }

    sections
}
