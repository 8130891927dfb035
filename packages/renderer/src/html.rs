use crate::vnode::VNode;

/// Options for HTML output
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Wrap the output in a complete HTML document
    pub document: bool,
    /// Page title when `document` is set
    pub title: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            document: false,
            title: "Pagecraft Page".to_string(),
        }
    }
}

struct Context {
    options: HtmlOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: HtmlOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        self.newline();
    }

    fn newline(&mut self) {
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        let indent = self.options.indent.clone();
        for _ in 0..self.depth {
            self.add(&indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Serialize a rendered tree to HTML
pub fn to_html(node: &VNode, options: HtmlOptions) -> String {
    let mut ctx = Context::new(options);

    if ctx.options.document {
        ctx.add_line("<!DOCTYPE html>");
        ctx.add_line("<html>");
        ctx.indent();

        ctx.add_line("<head>");
        ctx.indent();
        ctx.add_line("<meta charset=\"UTF-8\">");
        ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
        let title = format!("<title>{}</title>", escape_html(&ctx.options.title));
        ctx.add_line(&title);
        ctx.dedent();
        ctx.add_line("</head>");

        ctx.add_line("<body>");
        ctx.indent();
        write_node(node, &mut ctx);
        ctx.dedent();
        ctx.add_line("</body>");

        ctx.dedent();
        ctx.add_line("</html>");
    } else {
        write_node(node, &mut ctx);
    }

    ctx.get_output()
}

fn write_node(node: &VNode, ctx: &mut Context) {
    match node {
        VNode::Element {
            tag,
            attributes,
            styles,
            children,
            ..
        } => {
            if ctx.options.pretty {
                ctx.add_indent();
            }
            ctx.add(&format!("<{}", tag));

            for (name, value) in attributes {
                ctx.add(&format!(" {}=\"{}\"", name, escape_html(value)));
            }

            if !styles.is_empty() {
                let declarations: Vec<String> = styles
                    .iter()
                    .map(|(key, value)| format!("{}: {};", key, value))
                    .collect();
                ctx.add(&format!(" style=\"{}\"", escape_html(&declarations.join(" "))));
            }

            if children.is_empty() && is_self_closing(tag) {
                ctx.add(" />");
                ctx.newline();
                return;
            }

            ctx.add(">");

            let block = has_element_children(children);
            if block {
                ctx.newline();
                ctx.indent();
                for child in children {
                    write_node(child, ctx);
                }
                ctx.dedent();
                if ctx.options.pretty {
                    ctx.add_indent();
                }
            } else {
                for child in children {
                    write_inline(child, ctx);
                }
            }

            ctx.add(&format!("</{}>", tag));
            ctx.newline();
        }
        VNode::Text { content } => ctx.add_line(&escape_html(content)),
        VNode::Comment { content } => ctx.add_line(&format!("<!-- {} -->", content)),
    }
}

/// Child of an element holding only text
fn write_inline(node: &VNode, ctx: &mut Context) {
    match node {
        VNode::Text { content } => ctx.add(&escape_html(content)),
        VNode::Comment { content } => ctx.add(&format!("<!-- {} -->", content)),
        VNode::Element { .. } => write_node(node, ctx),
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "img"
            | "input"
            | "br"
            | "hr"
            | "meta"
            | "link"
            | "area"
            | "base"
            | "col"
            | "embed"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn has_element_children(children: &[VNode]) -> bool {
    children
        .iter()
        .any(|child| matches!(child, VNode::Element { .. }))
}
