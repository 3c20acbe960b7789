//! Prompt construction for diet advice

use crate::models::{CalculationResult, MeasurementInput};
use crate::units::{describe_height, describe_weight};

/// Render the advice prompt for a user's inputs and calorie targets.
///
/// Only the loss, maintenance and gain targets are quoted; the meal plan
/// aims at whichever of them matches the user's goal.
pub fn build_prompt(input: &MeasurementInput, result: &CalculationResult) -> String {
  let goal = input.goal.label();
  let diet = input.diet.label();
  let budget = input.budget.label();
  let target = result.target_for(input.goal);

  format!(
    r#"You are a friendly and encouraging health and fitness expert specializing in Indian cuisine.
A user has provided their details, their health goal, and their budget, and has received their daily calorie estimates.
Provide them with clear, actionable, and safe advice.

User's Data:
- Age: {age}
- Gender: {gender}
- Height: {height}
- Weight: {weight}
- Activity Level: (Based on multiplier, from sedentary to extra active)
- Dietary Preference: {diet}
- Primary Goal: {goal}
- Food Budget: {budget}

Calorie Results:
- For Weight Loss (0.5 lb/week): {loss} calories/day
- To Maintain Weight: {maintenance} calories/day
- For Weight Gain (0.5 lb/week): {gain} calories/day

Your task is to generate a response in Markdown format that includes:
1.  **A Brief, Positive Summary:** Start with a positive and encouraging summary of their results, acknowledging their goal.
2.  **Personalized Tips for their Goal:** Based on their goal ({goal}), provide 3-4 simple, actionable tips relevant to that goal.
3.  **A Sample One-Day Indian Meal Plan:**
    - This is the most important part. Create a simple, balanced, sample meal plan (Breakfast, Lunch, Dinner, Snacks).
    - The plan must align with their dietary preference ({diet}).
    - The plan must be suitable for their stated budget ({budget}). Suggest budget-friendly ingredients where appropriate (e.g., lentils, seasonal vegetables for low budget).
    - The total calories for the plan must align with their specific goal, targeting approximately **{target} calories**.
    - The plan must be based on common Indian food items.
    - Crucially, specify the quantity of each food item in **grams (g)**, based on its **cooked weight**, not raw. This is important for user convenience.
4.  **A Disclaimer:** End with a friendly disclaimer advising the user to consult with a healthcare professional or registered dietitian before making significant dietary changes.

Keep the tone supportive and easy to understand. Avoid overly technical jargon."#,
    age = input.age.trim(),
    gender = input.gender,
    height = describe_height(input),
    weight = describe_weight(input),
    loss = result.loss,
    maintenance = result.maintenance,
    gain = result.gain,
  )
}
