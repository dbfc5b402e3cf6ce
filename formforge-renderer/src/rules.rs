//! Per-kind render rules.
//!
//! Each rule is a pure `fn(&ResolvedProps, &FieldId) -> Element`. Rules read
//! nothing but their arguments and the read-only registry, so the same input
//! always yields the same markup.
//!
//! Shared conventions:
//! - control id: `<logicalName>-<instanceId>`
//! - `data-required` on the wrapper plus `required aria-required="true"` on the
//!   control, only when `required` is set
//! - `data-prefill="prefill"` on the wrapper, only when `prefill` is set

use formforge_core::registry::{self, FieldKind, FieldTypeDefinition};
use formforge_core::{FieldId, OptionPair, ResolvedProps};

use crate::markup::Element;

/// Signature shared by every render rule.
pub type RenderRule = fn(&ResolvedProps, &FieldId) -> Element;

/// Render rule for a kind.
pub fn rule_for(kind: FieldKind) -> RenderRule {
    match kind {
        FieldKind::Text => render_text,
        FieldKind::Email => render_email,
        FieldKind::Phone => render_phone,
        FieldKind::TextArea => render_textarea,
        FieldKind::DateTime => render_datetime,
        FieldKind::Dropdown => render_dropdown,
        FieldKind::Checkbox => render_checkbox,
        FieldKind::Radio => render_radio,
        FieldKind::Consent => render_consent,
        FieldKind::TextBlock => render_text_block,
        FieldKind::Divider => render_divider,
        FieldKind::Submit => render_submit,
    }
}

/// Value pattern the runtime applies to phone inputs.
pub const PHONE_PATTERN: &str = r"(\+[\(]?[0-9]{1,4}|[\(]?00[0-9]{0,2}|[\(]?011[0-9]?|[\(]?010[0-9]?)[\)]?([ \-\(\)]*[0-9][ \-\(\)]*){3,16}";

/// Input name the runtime uses to recognise consent checkboxes.
pub const CONSENT_INPUT_NAME: &str = "msdynmkt_purposeid;channels;optinwhenchecked";

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

fn definition(props: &ResolvedProps) -> &'static FieldTypeDefinition {
    registry::registry().get(props.kind)
}

fn control_id(props: &ResolvedProps, id: &FieldId) -> String {
    format!("{}-{}", props.text("logicalName"), id)
}

/// Wrapper for data-bound fields, up to (not including) the required and
/// prefill markers so option variants can slot `data-options` in first.
fn bound_wrapper(props: &ResolvedProps) -> Element {
    let def = definition(props);
    Element::new("div")
        .class(def.css_class)
        .attr("data-editorblocktype", def.block_type)
        .attr("data-targetproperty", props.text("logicalName"))
}

fn with_markers(wrapper: Element, props: &ResolvedProps) -> Element {
    wrapper
        .attr_if(props.flag("required"), "data-required", "required")
        .attr_if(props.flag("prefill"), "data-prefill", "prefill")
}

fn with_required_pair(control: Element, props: &ResolvedProps) -> Element {
    let required = props.flag("required");
    control
        .flag_if(required, "required")
        .attr_if(required, "aria-required", "true")
}

fn field_label(props: &ResolvedProps, for_id: &str, block: bool) -> Element {
    let label = props.text("label");
    Element::new("label")
        .attr("title", &label)
        .attr_if(block, "class", "block-label")
        .attr("for", for_id)
        .text(&label)
}

fn options_manifest(options: &[OptionPair]) -> String {
    serde_json::to_string(options).unwrap_or_else(|_| "[]".to_string())
}

/// Label + single `<input>` block shared by text, email, phone and date/time.
fn input_block(
    props: &ResolvedProps,
    id: &FieldId,
    input_type: &'static str,
    extra: impl FnOnce(Element) -> Element,
) -> Element {
    let cid = control_id(props, id);
    let input = Element::new("input")
        .attr("id", &cid)
        .attr("type", input_type)
        .attr("name", props.text("logicalName"))
        .attr("placeholder", props.text("placeholder"))
        .attr("title", props.text("label"));
    let input = with_required_pair(extra(input), props);

    with_markers(bound_wrapper(props), props)
        .child(field_label(props, &cid, false))
        .child(input)
}

// ---------------------------------------------------------------------------
// Input fields
// ---------------------------------------------------------------------------

fn render_text(props: &ResolvedProps, id: &FieldId) -> Element {
    input_block(props, id, "text", |input| {
        input.attr("maxlength", props.text("maxLength"))
    })
}

fn render_email(props: &ResolvedProps, id: &FieldId) -> Element {
    input_block(props, id, "email", |input| input)
}

fn render_phone(props: &ResolvedProps, id: &FieldId) -> Element {
    input_block(props, id, "tel", |input| input.attr("pattern", PHONE_PATTERN))
}

fn render_datetime(props: &ResolvedProps, id: &FieldId) -> Element {
    input_block(props, id, "datetime-local", |input| input)
}

fn render_textarea(props: &ResolvedProps, id: &FieldId) -> Element {
    let cid = control_id(props, id);
    let area = Element::new("textarea")
        .attr("id", &cid)
        .attr("name", props.text("logicalName"))
        .attr("placeholder", props.text("placeholder"))
        .attr("title", props.text("label"))
        .attr("cols", "20")
        .attr("rows", props.text("rows"))
        .attr("maxlength", props.text("maxLength"));

    with_markers(bound_wrapper(props), props)
        .child(field_label(props, &cid, false))
        .child(with_required_pair(area, props))
}

// ---------------------------------------------------------------------------
// Selection fields
// ---------------------------------------------------------------------------

fn render_dropdown(props: &ResolvedProps, id: &FieldId) -> Element {
    let cid = control_id(props, id);
    let placeholder = Element::new("option")
        .attr("value", "")
        .flag("disabled")
        .flag("selected")
        .flag("hidden")
        .text("Select");
    let choices = props
        .options("options")
        .iter()
        .map(|opt| Element::new("option").attr("value", &opt.value).text(&opt.label));
    let select = Element::new("select")
        .attr("id", &cid)
        .attr("name", props.text("logicalName"))
        .attr("title", props.text("label"));
    let select = with_required_pair(select, props)
        .child(placeholder)
        .children(choices);

    with_markers(bound_wrapper(props), props)
        .child(field_label(props, &cid, true))
        .child(select)
}

fn render_checkbox(props: &ResolvedProps, id: &FieldId) -> Element {
    let cid = control_id(props, id);
    let options = props.options("options");
    // The first option is the value submitted when the box is ticked.
    let checked_value = options.first().map(|o| o.value.as_str()).unwrap_or("");

    let input = Element::new("input")
        .attr("id", &cid)
        .attr("name", props.text("logicalName"))
        .attr("title", props.text("label"))
        .attr("type", "checkbox")
        .attr("value", checked_value);

    let wrapper = bound_wrapper(props).attr("data-options", options_manifest(options));
    with_markers(wrapper, props).child(
        Element::new("div").class("twooption_checkbox").child(
            Element::new("div")
                .child(with_required_pair(input, props))
                .child(field_label(props, &cid, true)),
        ),
    )
}

fn render_radio(props: &ResolvedProps, id: &FieldId) -> Element {
    let cid = control_id(props, id);
    let options = props.options("options");
    let default_value = props.text("defaultValue");

    let buttons = options.iter().enumerate().map(|(i, opt)| {
        let option_id = format!("{cid}-{i}");
        let input = Element::new("input")
            .attr("id", &option_id)
            .attr("name", props.text("logicalName"))
            .attr("title", &opt.label)
            .attr("type", "radio")
            .attr("value", &opt.value)
            .flag_if(opt.value == default_value, "checked");
        Element::new("div")
            .child(with_required_pair(input, props))
            .child(
                Element::new("label")
                    .attr("for", &option_id)
                    .attr("title", &opt.label)
                    .text(&opt.label),
            )
    });

    let wrapper = bound_wrapper(props).attr("data-options", options_manifest(options));
    with_markers(wrapper, props)
        .child(field_label(props, &cid, true))
        .child(
            Element::new("div")
                .attr("id", &cid)
                .class("radiobuttons")
                .children(buttons),
        )
}

// ---------------------------------------------------------------------------
// Consent
// ---------------------------------------------------------------------------

fn render_consent(props: &ResolvedProps, id: &FieldId) -> Element {
    let def = definition(props);
    let required = props.flag("required");
    let cid = format!("consent-{id}");
    let composite = format!(
        "{};{};{}",
        props.text("purposeId"),
        props.text("channels"),
        props.text("optInWhenChecked"),
    );

    let input = Element::new("input")
        .attr("type", "checkbox")
        .attr("id", &cid)
        .attr("name", CONSENT_INPUT_NAME)
        .attr("value", composite);

    Element::new("div")
        .class(def.css_class)
        .attr("data-editorblocktype", def.block_type)
        .attr_if(required, "data-required", "true")
        .attr("style", "padding: 4px 30px;")
        .attr("data-compliancesettingsid", props.text("complianceSettingsId"))
        .attr("data-compliancesettingsname", props.text("complianceSettingsName"))
        .attr("data-purposeid", props.text("purposeId"))
        .attr("data-purposename", props.text("purposeName"))
        .attr("data-channels", props.text("channels"))
        .attr("data-optinwhenchecked", props.text("optInWhenChecked"))
        .attr_if(props.flag("prefill"), "data-prefill", "prefill")
        .child(
            Element::new("div")
                .child(with_required_pair(input, props))
                .child(
                    Element::new("label")
                        .attr("id", format!("{cid}-label"))
                        .attr("for", &cid)
                        .child(Element::new("p").text(props.text("label"))),
                ),
        )
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

fn render_text_block(props: &ResolvedProps, _id: &FieldId) -> Element {
    let def = definition(props);
    let tag = props.text("tag");
    let body = Element::named(&tag)
        .unwrap_or_else(|| Element::new("p"))
        .text(props.text("content"));

    Element::new("div")
        .class(def.css_class)
        .attr("data-editorblocktype", def.block_type)
        .attr(
            "style",
            format!("margin: 10px; text-align: {};", props.text("align")),
        )
        .child(body)
}

fn render_divider(props: &ResolvedProps, _id: &FieldId) -> Element {
    let def = definition(props);
    let rule_style = format!(
        "margin: 0px; padding: 0px; vertical-align: top; \
         border-top-width: {}px; border-top-style: solid; border-top-color: {};",
        props.text("thickness"),
        props.text("color"),
    );

    let cell = Element::new("th").attr("style", rule_style).child(
        Element::new("p")
            .attr("style", "margin: 0px; padding: 0px; line-height: 0px; width: 100%;")
            .child(Element::new("span").static_text("&nbsp;")),
    );
    let table = Element::new("table")
        .attr(
            "style",
            "padding: 0px; margin: 0px; width: 100%; border-collapse: collapse;",
        )
        .attr("role", "presentation")
        .attr("cellpadding", "0")
        .attr("cellspacing", "0")
        .child(
            Element::new("tbody")
                .child(Element::new("tr").attr("style", "padding: 0px;").child(cell)),
        );

    Element::new("div")
        .attr("data-editorblocktype", def.block_type)
        .attr("style", "margin: 20px 10px;")
        .child(
            Element::new("div")
                .class(def.css_class)
                .attr("align", "center")
                .child(table),
        )
}

fn render_submit(props: &ResolvedProps, _id: &FieldId) -> Element {
    let def = definition(props);
    Element::new("div")
        .attr("data-editorblocktype", def.block_type)
        .class(def.css_class)
        .child(
            Element::new("button")
                .class("submitButton")
                .attr("type", "submit")
                .child(Element::new("span").text(props.text("buttonText"))),
        )
}
