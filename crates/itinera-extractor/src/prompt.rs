//! Prompt construction for itinerary extraction

/// JSON schema of the itinerary object the model must return
pub const ITINERARY_SCHEMA: &str = r#"{
  "type": "object",
  "properties": {
    "title": {"type": "string"},
    "subtitle": {"type": ["string", "null"]},
    "description": {"type": "string"},
    "nights": {"type": "integer", "minimum": 0},
    "days": {"type": "integer", "minimum": 0},
    "duration_display": {"type": "string"},
    "itinerary": {
      "type": "array",
      "items": {
        "type": "object",
        "properties": {
          "day_number": {"type": "integer", "minimum": 1},
          "title": {"type": "string"},
          "description": {"type": "string"},
          "route_from": {"type": ["string", "null"]},
          "route_to": {"type": ["string", "null"]},
          "overnight": {"type": ["string", "null"]},
          "meals": {"type": "array", "items": {"enum": ["breakfast", "lunch", "dinner"]}},
          "activities": {
            "type": "array",
            "items": {
              "type": "object",
              "properties": {
                "name": {"type": "string"},
                "type": {"enum": ["transfer", "cultural", "shopping", "adventure", "beach", "leisure", "show", "sightseeing"]},
                "highlight": {"type": "boolean"},
                "description": {"type": ["string", "null"]}
              },
              "required": ["name", "type"]
            }
          }
        },
        "required": ["day_number", "title"]
      }
    },
    "includes": {"type": "array", "items": {"type": "string"}},
    "excludes": {"type": "array", "items": {"type": "string"}},
    "highlights": {"type": "array", "items": {"type": "string"}}
  },
  "required": ["title", "itinerary"]
}"#;

const INSTRUCTIONS: &str = "You convert travel itinerary documents into JSON.
Read the document and return ONE JSON object matching this schema:";

const RULES: &str = "Rules:
- Use only facts stated in the document; leave a field empty or null when unsure.
- nights and days are integers; duration_display reads \"{days} Days / {nights} Nights\".
- description is at most three sentences.
- One itinerary entry per day, in document order.
- meals lists only meals stated as included.
- highlight is true for activities the document emphasizes (visit, explore, experience).
- Return the JSON object only, with no commentary.";

/// Builds the extraction prompt for one document
pub struct PromptBuilder<'a> {
    text: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a prompt builder for a document
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Build the complete prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(self.text.len() + ITINERARY_SCHEMA.len() + 1024);
        prompt.push_str(INSTRUCTIONS);
        prompt.push('\n');
        prompt.push_str(ITINERARY_SCHEMA);
        prompt.push_str("\n\n");
        prompt.push_str(RULES);
        prompt.push_str("\n\nDocument:\n---\n");
        prompt.push_str(self.text.trim());
        prompt.push_str("\n---\n");
        prompt
    }
}
