//! Part routing
//!
//! Partitions an ordered part sequence into two independent projections:
//! the rendering commands for the surface processor and the user-visible
//! contents for history. Unrecognized data payloads are dropped silently,
//! a permissive-parsing policy that favors forward compatibility.

use crate::history::Content;
use crate::protocol::{Part, RenderCommand};

/// The two projections produced by routing one part sequence
#[derive(Debug, Default)]
pub struct RoutedParts {
    pub commands: Vec<RenderCommand>,
    pub contents: Vec<Content>,
}

/// Route each part, preserving input order within both projections
///
/// Text parts become contents. Data parts carrying a recognized command
/// become commands; `beginRendering` additionally stays in contents so the
/// chat log keeps a trace of the surface being opened. Data parts with no
/// recognized command key go nowhere.
pub fn route(parts: Vec<Part>) -> RoutedParts {
    let mut routed = RoutedParts::default();
    for part in parts {
        if let Part::Data { ref data } = part {
            let Some(command) = RenderCommand::from_data(data) else {
                continue;
            };
            let keep_in_history = command.is_begin_rendering();
            routed.commands.push(command);
            if keep_in_history {
                routed.contents.push(Content::new(part));
            }
        } else {
            routed.contents.push(Content::new(part));
        }
    }
    routed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_part_routes_to_contents_only() {
        let routed = route(vec![Part::text("hello")]);
        assert!(routed.commands.is_empty());
        assert_eq!(routed.contents.len(), 1);
        assert_eq!(routed.contents[0].part, Part::text("hello"));
    }

    #[test]
    fn test_surface_update_routes_to_commands_only() {
        let payload = json!({"surfaceId": "s1", "components": []});
        let routed = route(vec![Part::data(json!({"surfaceUpdate": payload.clone()}))]);
        assert_eq!(
            routed.commands,
            vec![RenderCommand::SurfaceUpdate(payload)]
        );
        assert!(routed.contents.is_empty());
    }

    #[test]
    fn test_begin_rendering_routes_to_both() {
        let part = Part::data(json!({"beginRendering": {"surfaceId": "s1"}}));
        let routed = route(vec![part.clone()]);
        assert_eq!(
            routed.commands,
            vec![RenderCommand::BeginRendering(json!({"surfaceId": "s1"}))]
        );
        assert_eq!(routed.contents.len(), 1);
        assert_eq!(routed.contents[0].part, part);
    }

    #[test]
    fn test_unrecognized_data_part_is_dropped() {
        let routed = route(vec![Part::data(json!({"unknownKey": 1}))]);
        assert!(routed.commands.is_empty());
        assert!(routed.contents.is_empty());
    }

    #[test]
    fn test_projections_preserve_input_order_independently() {
        let routed = route(vec![
            Part::text("one"),
            Part::data(json!({"surfaceUpdate": {"surfaceId": "a"}})),
            Part::text("two"),
            Part::data(json!({"deleteSurface": {"surfaceId": "b"}})),
        ]);
        assert_eq!(
            routed.commands,
            vec![
                RenderCommand::SurfaceUpdate(json!({"surfaceId": "a"})),
                RenderCommand::DeleteSurface(json!({"surfaceId": "b"})),
            ]
        );
        let texts: Vec<String> = routed
            .contents
            .iter()
            .map(|content| match &content.part {
                Part::Text { text } => text.clone(),
                Part::Data { .. } => unreachable!(),
            })
            .collect();
        assert_eq!(texts, vec!["one", "two"]);
    }
}
