//! Post-processing passes over a highlighted code block.
//!
//! `preprocess` runs before highlighting and may change the block options,
//! `pre` runs on the finished `pre` element. Passes run in list order.

use crate::highlight::hast::{h, text, Element, Node};
use crate::highlight::meta::{parse_meta_string, Meta};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeMeta {
    /// Info string after the language, untouched.
    pub raw: Option<String>,
    pub values: Meta,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeOptions {
    pub lang: Option<String>,
    pub meta: CodeMeta,
}

pub trait CodeTransformer: Send + Sync {
    fn name(&self) -> &'static str;

    fn preprocess(&self, _options: &mut CodeOptions) {}

    fn pre(&self, _node: &mut Element, _options: &CodeOptions) {}
}

/// Nests the code in an outer `div`, so the block can be styled as a frame around a scrolling `pre`.
pub struct UpdateStyle;

impl CodeTransformer for UpdateStyle {
    fn name(&self) -> &'static str {
        "transformer-update-style"
    }

    fn pre(&self, node: &mut Element, _options: &CodeOptions) {
        if node.tag_name != "pre" {
            return;
        }
        let children = std::mem::take(&mut node.children);
        let container = h("pre", &[], children);
        node.children = vec![container.into()];
        node.tag_name = "div".to_string();
    }
}

/// Parses `key="value"` pairs of the raw meta string into the block options.
pub struct ProcessMeta;

impl CodeTransformer for ProcessMeta {
    fn name(&self) -> &'static str {
        "transformer-process-meta"
    }

    fn preprocess(&self, options: &mut CodeOptions) {
        let Some(ref raw) = options.meta.raw else {
            return;
        };
        let parsed = parse_meta_string(raw);
        options.meta.values.extend(parsed);
    }
}

/// Prepends a `div.meta-head` with the file name when the block has a `filename` meta value.
pub struct AddMetaHead;

impl CodeTransformer for AddMetaHead {
    fn name(&self) -> &'static str {
        "transformer-add-filename"
    }

    fn pre(&self, node: &mut Element, options: &CodeOptions) {
        let Some(filename) = options.meta.values.get("filename") else {
            return;
        };
        if node.first_element().is_some_and(|e| e.has_class("meta-head")) {
            return;
        }

        let meta_head = h("div", &[("class", "meta-head")], vec![
            h("span", &[("class", "filename")], vec![text(filename.as_str())]).into(),
        ]);
        node.children.insert(0, Node::Element(meta_head));
    }
}

pub fn default_transformers() -> Vec<Box<dyn CodeTransformer>> {
    vec![Box::new(ProcessMeta), Box::new(UpdateStyle), Box::new(AddMetaHead)]
}

pub fn run_preprocess(transformers: &[Box<dyn CodeTransformer>], options: &mut CodeOptions) {
    for transformer in transformers {
        transformer.preprocess(options);
    }
}

pub fn run_pre(transformers: &[Box<dyn CodeTransformer>], node: &mut Element, options: &CodeOptions) {
    for transformer in transformers {
        transformer.pre(node, options);
    }
}
