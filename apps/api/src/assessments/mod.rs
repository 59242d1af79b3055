// Mock interviews: LLM-generated multiple-choice quizzes on a topic, scored on
// submission. Completed scores feed the dashboard.

pub mod generator;
pub mod handlers;
pub mod prompts;
