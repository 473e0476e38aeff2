//! Per-kind printers for JSX elements

use super::Printer;
use crate::{doc::Doc, path::Node};
use jsfmt_syntax::ast::jsx::*;

impl<'a, 's: 'a> Printer<'a, 's> {
  pub(crate) fn jsx_element(&mut self, element: &'a JsxElement<'s>) -> Doc<'a> {
    self.path.push("element", Node::JsxElement(element));
    let doc = self.jsx_element_inner(element);
    self.path.pop();
    doc
  }

  fn jsx_element_inner(&mut self, element: &'a JsxElement<'s>) -> Doc<'a> {
    let name = element.name.as_ref().map_or("", |name| name.name);
    let opening = self.jsx_opening(element, name);

    if element.self_closing {
      return opening;
    }

    let children: std::vec::Vec<Doc> = element
      .children
      .iter()
      .filter_map(|child| self.jsx_child(child))
      .collect();

    if children.is_empty() {
      return self.concat([opening, Doc::Text("</"), Doc::Text(name), Doc::Text(">")]);
    }

    let mut inner = std::vec::Vec::new();
    for (index, child) in children.into_iter().enumerate() {
      if index > 0 {
        inner.push(Doc::SoftLine);
      }
      inner.push(child);
    }
    let inner = self.concat_iter(inner);

    self.group([
      opening,
      self.indent([Doc::SoftLine, inner]),
      Doc::SoftLine,
      Doc::Text("</"),
      Doc::Text(name),
      Doc::Text(">"),
    ])
  }

  fn jsx_opening(&mut self, element: &'a JsxElement<'s>, name: &'a str) -> Doc<'a> {
    if element.attributes.is_empty() {
      return if element.self_closing {
        self.concat([Doc::Text("<"), Doc::Text(name), Doc::Text(" />")])
      } else {
        self.concat([Doc::Text("<"), Doc::Text(name), Doc::Text(">")])
      };
    }

    let mut attributes = std::vec::Vec::new();
    for attribute in &element.attributes {
      attributes.push(Doc::Line);
      attributes.push(self.jsx_attribute(attribute));
    }
    let attributes = self.concat_iter(attributes);

    let closing = if element.self_closing {
      self.concat([Doc::Line, Doc::Text("/>")])
    } else if self.config.jsx_bracket_same_line {
      Doc::Text(">")
    } else {
      self.concat([Doc::SoftLine, Doc::Text(">")])
    };

    self.group([
      Doc::Text("<"),
      Doc::Text(name),
      self.indent([attributes]),
      closing,
    ])
  }

  fn jsx_attribute(&mut self, attribute: &'a JsxAttributeItem<'s>) -> Doc<'a> {
    match attribute {
      JsxAttributeItem::Attribute(attribute) => {
        self.path.push("attributes", Node::JsxAttribute(attribute));
        let doc = match &attribute.value {
          None => Doc::Text(attribute.name.name),
          Some(JsxAttributeValue::String(string)) => self.concat([
            Doc::Text(attribute.name.name),
            Doc::Text("="),
            // JSX attribute strings keep their original spelling
            Doc::Text(string.raw),
          ]),
          Some(JsxAttributeValue::Container(container)) => {
            let value = self.jsx_container(container);
            self.concat([Doc::Text(attribute.name.name), Doc::Text("="), value])
          }
        };
        self.path.pop();
        doc
      }
      JsxAttributeItem::Spread(spread) => {
        let argument = self.expression("argument", &spread.argument);
        self.concat([Doc::Text("{..."), argument, Doc::Text("}")])
      }
    }
  }

  fn jsx_child(&mut self, child: &'a JsxChild<'s>) -> Option<Doc<'a>> {
    match child {
      JsxChild::Element(element) => Some(self.jsx_element(element)),
      JsxChild::Container(container) => Some(self.jsx_container(container)),
      JsxChild::Text(text) => {
        let collapsed: std::vec::Vec<&str> = text.raw.split_whitespace().collect();
        if collapsed.is_empty() {
          return None;
        }
        Some(self.string(collapsed.join(" ")))
      }
    }
  }

  fn jsx_container(&mut self, container: &'a JsxExpressionContainer<'s>) -> Doc<'a> {
    self.path.push("container", Node::JsxExpressionContainer(container));

    let doc = match &container.expression {
      Some(expression) => {
        let expression = self.expression("expression", expression);
        self.concat([Doc::Text("{"), expression, Doc::Text("}")])
      }
      None => {
        // a comment-only container: `{/* note */}`
        let dangling = self.comments.take_dangling(container.span);
        let mut inner = vec![Doc::Text("{")];
        for comment in dangling {
          inner.push(self.comment_doc(comment));
        }
        inner.push(Doc::Text("}"));
        self.concat_iter(inner)
      }
    };

    self.path.pop();
    doc
  }
}
