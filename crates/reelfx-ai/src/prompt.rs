//! Prompt construction for the suggestion providers.

use reelfx_timeline::Segment;

use crate::scenes::SCENES;

fn scene_list(separator: &str) -> String {
    SCENES
        .iter()
        .map(|s| format!("\"{}\"", s.id))
        .collect::<Vec<_>>()
        .join(separator)
}

/// One transcript line as the providers see it: `[id] "text" (0s - 3s)`.
fn segment_line(segment: &Segment) -> String {
    format!(
        "[{}] \"{}\" ({}s - {}s)",
        segment.id, segment.text, segment.start_time, segment.end_time
    )
}

/// Prompt asking for a JSON array of illustration placements over a transcript.
pub fn batch_prompt(segments: &[Segment]) -> String {
    let transcript = segments.iter().map(segment_line).collect::<Vec<_>>().join("\n");
    format!(
        r#"You are a Senior Motion Graphics Director at a top-tier video agency.
Analyze the transcript below and decide where to place CINEMATIC programmatic B-roll scenes.
Think like an After Effects pro: timing, pacing, visual hierarchy.

IMPORTANT: Respond ONLY in English. Output ONLY a JSON array.

CRITICAL RULES:
1. Less is More: only add overlays to IMPACTFUL moments (roughly one every 10-15 seconds).
   Leave filler moments clean.
2. Use "visual-illustration" for visual scenes, actions, places, concepts or objects.
   Use displayMode "full" for cinematic full-screen B-roll.
   Available scenes: {scenes}
3. Pacing: never stack overlays on neighbouring segments.
4. Variety: do not repeat the same scene consecutively.

Overlay props:
- "visual-illustration": {{ scene: string, label: string, color: string,
    displayMode: "full"|"fit"|"overlay"|"card"|"split-top"|"split-bottom",
    transition: "slide-in"|"fade-in"|"appear" }}

Transcript Segments:
{transcript}

Return strictly a JSON array of objects:
{{ "segmentId": string, "type": "visual-illustration", "props": object }}.
Return [] if no graphics are needed."#,
        scenes = scene_list(", "),
        transcript = transcript,
    )
}

/// Prompt asking for one overlay object for a single segment and user instruction.
pub fn single_prompt(segment_text: &str, user_prompt: &str) -> String {
    format!(
        r#"You are a motion graphics B-roll expert.
Given a transcript segment and a user instruction, return the SINGLE BEST programmatic overlay
to visually illustrate the content.

IMPORTANT: Respond ONLY in English. Output ONLY a JSON object with no extra text.

TRANSCRIPT TEXT: "{segment_text}"
USER INSTRUCTION: "{user_prompt}"

Available overlay types:
- "visual-illustration": {{ scene: string, label: string, color: string,
    displayMode: "full"|"fit"|"overlay"|"card"|"split-top"|"split-bottom",
    transition: "slide-in"|"fade-in"|"appear" }}
  Scene options: {scenes}
- "emoji-reaction": {{ emoji: string (single emoji), size: number (60-100) }}
- "glowing-particles": {{ color: string, count: number, style: "ambient"|"burst"|"rising" }}
- "scene-transition": {{ style: "fade"|"wipe"|"zoom", color: string }}

RULES for choosing:
- A VISUAL scene, action, place or concept: "visual-illustration" with displayMode "full".
- EMOTION, reaction, humor or surprise: "emoji-reaction".

Respond with ONLY a JSON object: {{ "type": string, "props": object }}"#,
        segment_text = segment_text,
        user_prompt = user_prompt,
        scenes = scene_list("|"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_prompt_lists_segments_and_scenes() {
        let segments = vec![
            Segment::new("s1", 0.0, 3.0, "the rocket launch"),
            Segment::new("s2", 3.0, 6.5, "um yeah"),
        ];
        let prompt = batch_prompt(&segments);
        assert!(prompt.contains("[s1] \"the rocket launch\" (0s - 3s)"));
        assert!(prompt.contains("[s2] \"um yeah\" (3s - 6.5s)"));
        assert!(prompt.contains("\"airplane-travel\""));
        assert!(prompt.contains("JSON array"));
    }

    #[test]
    fn test_single_prompt_embeds_inputs() {
        let prompt = single_prompt("we shipped it", "make it exciting");
        assert!(prompt.contains("TRANSCRIPT TEXT: \"we shipped it\""));
        assert!(prompt.contains("USER INSTRUCTION: \"make it exciting\""));
        assert!(prompt.contains("\"solar-system\"|\"growth-chart\""));
    }
}
