//! Formula guides shown next to each calculator.

use serde::Serialize;

use crate::model::CalculatorKind;

/// How a tool computes its result, with study tips.
#[derive(Debug, Clone, Serialize)]
pub struct FormulaInfo {
    pub title: &'static str,
    pub formula: &'static str,
    pub explanation: &'static str,
    pub tips: &'static [&'static str],
}

/// The guide for a calculator.
pub fn formula_info(kind: CalculatorKind) -> FormulaInfo {
    match kind {
        CalculatorKind::Subject => FormulaInfo {
            title: "Subject average",
            formula: "avg = (sum of coefficient-1 scores + midterm x 2 + final x 3) / total coefficients",
            explanation: "Add up the regular test scores (coefficient 1), add the midterm \
                          times 2 and the final times 3, then divide by the sum of all coefficients.",
            tips: &[
                "Regular scores are oral checks and 15-minute tests.",
                "The midterm counts double, so it matters a lot.",
                "The final counts triple: your biggest chance to pull the average up.",
                "Example: three 15-minute tests, one midterm, one final gives 3 + 2 + 3 = 8 coefficients.",
            ],
        },
        CalculatorKind::Semester => FormulaInfo {
            title: "Semester average",
            formula: "avg = sum(subject average x subject coefficient) / sum(subject coefficients)",
            explanation: "Multiply each subject average by its coefficient (core subjects usually \
                          count double), add them up and divide by the total coefficient.",
            tips: &[
                "Math, literature and english usually have coefficient 2.",
                "Every other subject has coefficient 1.",
                "Do not neglect minor subjects: a 9 or 10 there lifts the average quickly.",
                "Studying all subjects evenly is the best strategy.",
            ],
        },
        CalculatorKind::Yearly => FormulaInfo {
            title: "Yearly average",
            formula: "avg = (semester 1 + semester 2 x 2) / 3",
            explanation: "The second semester counts double, then the sum is divided by 3. \
                          The second semester largely decides the year.",
            tips: &[
                "Semester 2 weighs twice as much as semester 1.",
                "A weak first semester can still be recovered in the second.",
                "Example: 6.5 in semester 1 and 7.8 in semester 2 gives 7.37 for the year.",
            ],
        },
        CalculatorKind::Target => FormulaInfo {
            title: "Required exam score",
            formula: "required = (target x (current weight + exam weight) - current x current weight) / exam weight",
            explanation: "Tells you exactly what the next exam needs so your average reaches the goal.",
            tips: &[
                "Enter the target average (for example 8.0).",
                "Enter your current average.",
                "The result is the precise score you need.",
                "Avoid pressure: set several small goals to work towards.",
            ],
        },
    }
}
