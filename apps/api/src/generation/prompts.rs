// All LLM prompt templates for the generation module.
// Placeholders are `{name}` and are filled with `str::replace` before sending.

/// Persona for learning-material generation.
pub const LEARN_MATERIAL_PERSONA: &str = "You are an AI expert in creating educational content.";

/// Replace `{topic}` and `{accuracy_instruction}`.
pub const LEARN_MATERIAL_PROMPT_TEMPLATE: &str = r#"Generate a set of learning materials based on the following topic.

Topic: {topic}

Please generate:
1. A set of 4-6 flashcards with questions and answers covering the key concepts of the topic.
2. A multiple-choice quiz with exactly 10 questions. Each question must have exactly 4 distinct options, and one of the options must be exactly the same string as the correct answer.

{accuracy_instruction}

Return a JSON object with this EXACT schema (no extra fields):
{
  "flashcards": [
    {"question": "What pigment absorbs light in plants?", "answer": "Chlorophyll"}
  ],
  "quiz": [
    {
      "question": "Where do the light-dependent reactions take place?",
      "options": ["Thylakoid membrane", "Stroma", "Cytoplasm", "Nucleus"],
      "answer": "Thylakoid membrane"
    }
  ]
}"#;

/// Persona for mindmap generation.
pub const MINDMAP_PERSONA: &str =
    "You are an expert educator that generates highly accurate, structured mindmaps for students.";

/// Replace `{topic}` and `{accuracy_instruction}`.
pub const MINDMAP_PROMPT_TEMPLATE: &str = r#"Generate a detailed mindmap for the topic: "{topic}".

The mindmap must be hierarchical with main branches and sub-branches. It should include key concepts, definitions, examples, and connections between topics. Each branch should have 2-5 sub-branches, making it neither too sparse nor too dense. Do not nest deeper than 4 levels below the root. The content must be concise, accurate, and educational.

{accuracy_instruction}

Return a single root node as a JSON object. Every node has a unique string "id", a "title", and a "children" array (empty for leaves):
{
  "id": "root",
  "title": "Photosynthesis",
  "children": [
    {
      "id": "1",
      "title": "Light-dependent reactions",
      "children": [
        {"id": "1.1", "title": "Photolysis of water", "children": []},
        {"id": "1.2", "title": "ATP and NADPH production", "children": []}
      ]
    }
  ]
}"#;

/// Persona for roadmap generation.
pub const ROADMAP_PERSONA: &str = "You are an AI expert in creating educational roadmaps.";

/// Replace `{topic}` and `{accuracy_instruction}`.
pub const ROADMAP_PROMPT_TEMPLATE: &str = r#"For the given topic, generate a step-by-step learning plan structured into "Beginner", "Intermediate", and "Advanced" levels, in that order.

Topic: {topic}

For each level, provide a list of sequential steps. Each step must include:
1. "subtopic": A clear, concise title for the concept to learn.
2. "resources": An array of 1-2 high-quality online resources (articles or videos) to learn the subtopic. Each entry must be a complete https URL to a well-known, stable page. Never invent URLs.
3. "time": A realistic time estimate to master the subtopic (e.g., "2h", "1d").
4. "milestone": A brief description of the key skill or knowledge gained after completing that step.

{accuracy_instruction}

Return a JSON object with this EXACT schema (no extra fields):
{
  "topic": "topic_name",
  "roadmap": [
    {"level": "Beginner", "steps": [{"subtopic": "...", "resources": ["https://..."], "time": "2h", "milestone": "..."}]},
    {"level": "Intermediate", "steps": [...]},
    {"level": "Advanced", "steps": [...]}
  ]
}"#;

/// Persona for turning a study goal into search queries.
pub const SEARCH_QUERY_PERSONA: &str =
    "You turn a student's study goal into short, effective search engine queries.";

/// Replace `{study_goal}`.
pub const SEARCH_QUERY_PROMPT_TEMPLATE: &str = r#"Study goal: {study_goal}

Write one query for finding tutorial videos on YouTube and one query for finding written articles or documentation on the web. Each query must be under 12 words and must not contain quotes or search operators.

Return a JSON object with this EXACT schema (no extra fields):
{
  "videoQuery": "python basics tutorial for beginners",
  "articleQuery": "python basics guide variables loops functions"
}"#;

/// Persona for the chatbot tutor.
pub const TUTOR_PERSONA: &str = "You are an AI Chatbot Tutor designed to help students with their doubts and generate mindmaps for topics.";

/// Replace `{query}` and `{accuracy_instruction}`.
pub const TUTOR_PROMPT_TEMPLATE: &str = r#"Respond to the following query from the student:
{query}

If the student asks for a mindmap, generate one for the topic. Otherwise, set "mindmap" to null.

{accuracy_instruction}

Return a JSON object with this EXACT schema (no extra fields):
{
  "response": "Your explanation for the student, in plain text or markdown.",
  "mindmap": null
}

When a mindmap is requested, "mindmap" is a root node where every node has a unique string "id", a "title", and a "children" array:
{"id": "root", "title": "Topic", "children": [{"id": "1", "title": "Branch", "children": []}]}"#;

/// Persona for quiz feedback.
pub const QUIZ_FEEDBACK_PERSONA: &str = "You are an expert AI tutor.";

/// Replace `{topic}`, `{incorrect_count}` and `{incorrect_answers}`.
pub const QUIZ_FEEDBACK_PROMPT_TEMPLATE: &str = r#"A student has just completed a quiz on the topic "{topic}".
Analyze their performance based on the questions they answered incorrectly.

Student's incorrect answers:
{incorrect_answers}

Based on this, provide personalized, encouraging, and constructive feedback:
- "summary": 2-3 sentences identifying the key concepts or areas where the student is struggling.
- "improvementTips": 1-5 specific, actionable areas to focus on.
- "questionFeedback": exactly {incorrect_count} entries, one per incorrect answer above and in the same order, explaining why the correct answer is right.

Return a JSON object with this EXACT schema (no extra fields):
{
  "summary": "...",
  "improvementTips": ["..."],
  "questionFeedback": [
    {"question": "the question text as given", "explanation": "..."}
  ]
}"#;
