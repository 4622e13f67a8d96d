use crate::state::{TriggerSource, CLICKS_PROPERTY, HURRICANE_CONTAINER};

use super::figure::Figure;

pub const PAGE_TITLE: &str = "Global Temperature, Hurricanes, Ocean levels and Arctic Sea Ice Levels";

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const PAGE_SCRIPT: &str = include_str!("dashboard.js");

type Style = &'static [(&'static str, &'static str)];

// ---------------------------------------------------------------------------
// Layout tree
// ---------------------------------------------------------------------------

/// A node of the static page layout.
#[derive(Debug, Clone)]
pub enum Node {
    Div {
        id: Option<&'static str>,
        style: Style,
        children: Vec<Node>,
    },
    Paragraph {
        text: &'static str,
        style: Style,
    },
    Graph {
        id: String,
        figure: Figure,
        style: Style,
    },
    Button {
        source: TriggerSource,
        style: Style,
    },
}

impl Node {
    fn div(style: Style, children: Vec<Node>) -> Self {
        Node::Div {
            id: None,
            style,
            children,
        }
    }

    fn graph(id: &str, figure: &Figure, style: Style) -> Self {
        Node::Graph {
            id: id.to_string(),
            figure: figure.clone(),
            style,
        }
    }
}

/// The figures shown from page load.
#[derive(Debug, Clone)]
pub struct StaticFigures {
    pub global_temperature: Figure,
    pub arctic_ice: Figure,
    pub sea_levels: Figure,
    pub continent_temperature: Figure,
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

const HEADER_TEXT: Style = &[
    ("font-size", "25px"),
    ("font-weight", "bold"),
    ("font-family", "Verdana"),
    ("padding-left", "20px"),
    ("color", "lightblue"),
];
const HEADER_BOX: Style = &[("width", "100%"), ("float", "left")];
const MAP_BOX: Style = &[("width", "58%"), ("float", "left"), ("padding", "20px")];
const ICE_BOX: Style = &[("width", "34%"), ("float", "left"), ("padding", "20px")];
const SEA_BOX: Style = &[("width", "20%"), ("float", "left"), ("padding", "20px")];
const CONTINENT_BOX: Style = &[("width", "45%"), ("float", "left"), ("padding", "20px")];
const HURRICANE_BOX: Style = &[("width", "25%"), ("float", "left"), ("padding", "20px")];
const BUTTON: Style = &[("width", "50%"), ("height", "30px")];

/// Arrange the static charts, the two buttons and the hurricane slot.
pub fn compose(figures: &StaticFigures) -> Node {
    Node::div(
        &[],
        vec![
            Node::div(
                HEADER_BOX,
                vec![Node::Paragraph {
                    text: PAGE_TITLE,
                    style: HEADER_TEXT,
                }],
            ),
            Node::div(
                &[],
                vec![Node::graph("global_temp_map", &figures.global_temperature, MAP_BOX)],
            ),
            Node::div(ICE_BOX, vec![Node::graph("arctic_ice_graph", &figures.arctic_ice, &[])]),
            Node::div(SEA_BOX, vec![Node::graph("sea_levels_graph", &figures.sea_levels, &[])]),
            Node::div(
                CONTINENT_BOX,
                vec![Node::graph("temperature_animation", &figures.continent_temperature, &[])],
            ),
            Node::div(
                HURRICANE_BOX,
                vec![
                    Node::Button {
                        source: TriggerSource::HurricaneCount,
                        style: BUTTON,
                    },
                    Node::Button {
                        source: TriggerSource::CycloneEnergy,
                        style: BUTTON,
                    },
                    Node::Div {
                        id: Some(HURRICANE_CONTAINER),
                        style: &[],
                        children: Vec::new(),
                    },
                ],
            ),
        ],
    )
}

// ---------------------------------------------------------------------------
// HTML rendering
// ---------------------------------------------------------------------------

/// Render the whole page. `callback_url` receives the button events.
pub fn render_page(root: &Node, callback_url: &str) -> Result<String, serde_json::Error> {
    let mut body = String::new();
    render_node(root, &mut body)?;

    Ok(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <script src=\"{PLOTLY_CDN}\"></script>\n</head>\n<body>\n{body}\n\
         <script>\nconst CALLBACK_URL = \"{callback}\";\nconst OUTPUT_ID = \"{HURRICANE_CONTAINER}\";\n\
         const CLICKS_PROPERTY = \"{CLICKS_PROPERTY}\";\n{PAGE_SCRIPT}</script>\n</body>\n</html>\n",
        title = escape(PAGE_TITLE),
        callback = escape(callback_url),
    ))
}

fn render_node(node: &Node, out: &mut String) -> Result<(), serde_json::Error> {
    match node {
        Node::Div {
            id,
            style,
            children,
        } => {
            out.push_str("<div");
            if let Some(id) = id {
                out.push_str(&format!(" id=\"{}\"", escape(id)));
            }
            push_style(style, out);
            out.push('>');
            for child in children {
                render_node(child, out)?;
            }
            out.push_str("</div>\n");
        }
        Node::Paragraph { text, style } => {
            out.push_str("<p");
            push_style(style, out);
            out.push_str(&format!(">{}</p>\n", escape(text)));
        }
        Node::Graph { id, figure, style } => {
            out.push_str(&format!("<div class=\"graph\" id=\"{}\"", escape(id)));
            push_style(style, out);
            out.push_str("></div>\n");
            let json = serde_json::to_string(figure)?;
            out.push_str(&format!(
                "<script type=\"application/json\" data-figure-for=\"{}\">{}</script>\n",
                escape(id),
                json.replace("</", "<\\/")
            ));
        }
        Node::Button { source, style } => {
            out.push_str(&format!(
                "<button id=\"{}\" data-{}=\"0\"",
                source.control_id(),
                CLICKS_PROPERTY.replace('_', "-")
            ));
            push_style(style, out);
            out.push_str(&format!(">{}</button>\n", escape(source.label())));
        }
    }
    Ok(())
}

fn push_style(style: &[(&str, &str)], out: &mut String) {
    if style.is_empty() {
        return;
    }
    let css: Vec<String> = style.iter().map(|(k, v)| format!("{k}: {v}")).collect();
    out.push_str(&format!(" style=\"{}\"", escape(&css.join("; "))));
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::figure::{Layout, Title};

    fn titled(text: &str) -> Figure {
        Figure {
            layout: Layout {
                title: Some(Title::new(text)),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn figures() -> StaticFigures {
        StaticFigures {
            global_temperature: titled("map"),
            arctic_ice: titled("ice"),
            sea_levels: titled("sea </script> level"),
            continent_temperature: titled("continents"),
        }
    }

    fn graph_ids(node: &Node, ids: &mut Vec<String>) {
        match node {
            Node::Div { children, .. } => children.iter().for_each(|c| graph_ids(c, ids)),
            Node::Graph { id, .. } => ids.push(id.clone()),
            _ => {}
        }
    }

    #[test]
    fn layout_holds_four_charts_in_page_order() {
        let mut ids = Vec::new();
        graph_ids(&compose(&figures()), &mut ids);
        assert_eq!(
            ids,
            ["global_temp_map", "arctic_ice_graph", "sea_levels_graph", "temperature_animation"]
        );
    }

    #[test]
    fn page_has_buttons_and_empty_output_slot() {
        let html = render_page(&compose(&figures()), "/_callbacks/hurricane_container").unwrap();

        assert!(html.contains(PAGE_TITLE));
        assert!(html.contains("<button id=\"hur_num\" data-n-clicks=\"0\""));
        assert!(html.contains(">Number of Hurricanes</button>"));
        assert!(html.contains(">Cyclone Energy</button>"));
        assert!(html.contains("<div id=\"hurricane_container\"></div>"));
        assert!(html.contains("width: 58%; float: left; padding: 20px"));
    }

    #[test]
    fn page_script_ignores_superseded_replies() {
        let html = render_page(&compose(&figures()), "/cb").unwrap();
        assert!(html.contains("const sequence = ++latestRequest;"));
        assert!(html.contains("if (sequence !== latestRequest)"));
    }

    #[test]
    fn embedded_figures_cannot_close_their_script_tag() {
        let html = render_page(&compose(&figures()), "/cb").unwrap();
        assert!(html.contains("sea <\\/script> level"));
        assert!(!html.contains("sea </script> level"));
    }
}
