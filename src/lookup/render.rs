use crate::config::{Config, explorer_address_url};
use crate::lookup::AddressLookup;
use crate::models::lookup::LookupResult;
use crate::ui::{self, AlertTone, ButtonVariant};
use crate::utils::format::{escape_html, group_thousands};

pub const TITLE: &str = "Irys Transaction Checker";
pub const SUBTITLE: &str = "Check your transaction count on Irys Network Testnet";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputView {
    pub value: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitView {
    pub disabled: bool,
    pub busy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultPanel {
    Success {
        address: String,
        count: String,
        explorer_url: String,
    },
    Error {
        reason: String,
    },
}

/// Everything the page shows, derived from controller state alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub input: InputView,
    pub submit: SubmitView,
    pub panel: Option<ResultPanel>,
    /// Reload the page periodically while a lookup is in flight.
    pub auto_refresh: bool,
    pub explorer_home: String,
    pub rpc_endpoint: String,
}

pub fn page(lookup: &AddressLookup, config: &Config) -> Page {
    let loading = lookup.is_loading();

    let panel = lookup.result().map(|result| match result {
        LookupResult::Success { address, count } => ResultPanel::Success {
            address: address.clone(),
            count: group_thousands(*count),
            explorer_url: explorer_address_url(&config.explorer_url, address),
        },
        LookupResult::Failure { reason, .. } => ResultPanel::Error {
            reason: reason.clone(),
        },
    });

    Page {
        input: InputView {
            value: lookup.input().to_string(),
            disabled: loading,
        },
        submit: SubmitView {
            disabled: lookup.submit_disabled(),
            busy: loading,
        },
        panel,
        auto_refresh: loading,
        explorer_home: config.explorer_url.to_string(),
        rpc_endpoint: config.rpc_url.to_string(),
    }
}

impl ResultPanel {
    fn to_html(&self) -> String {
        let (alert, explorer) = match self {
            ResultPanel::Success {
                address,
                count,
                explorer_url,
            } => {
                let body = format!(
                    r#"<div class="alert-title">Transaction Count Retrieved Successfully</div><div class="small">Address: <code>{}</code></div><div class="count">Total Transactions: {}</div>"#,
                    escape_html(address),
                    ui::badge(count)
                );
                let explorer = ui::link_button(
                    ButtonVariant::Outline,
                    explorer_url,
                    true,
                    "&#8599; View in Explorer",
                );
                (ui::alert(AlertTone::Success, &body), explorer)
            }
            ResultPanel::Error { reason } => {
                let body = format!(
                    r#"<div class="alert-title">Error</div><div class="small">{}</div>"#,
                    escape_html(reason)
                );
                (ui::alert(AlertTone::Error, &body), String::new())
            }
        };

        let reset = format!(
            r#"<form method="post" action="/reset">{}</form>"#,
            ui::button(
                ButtonVariant::Outline,
                false,
                "Check Another Address"
            )
        );

        format!(r#"<div class="results">{alert}<div class="actions">{explorer}{reset}</div></div>"#)
    }
}

impl Page {
    pub fn to_html(&self) -> String {
        let submit_label = if self.submit.busy {
            r#"<span class="spinner" aria-label="Loading"></span>"#
        } else {
            "&#128269;"
        };

        let form = format!(
            r#"<form method="post" action="/lookup"><label for="address" class="label">Wallet Address</label><div class="row">{}{}</div></form>"#,
            ui::text_input(
                "address",
                "address",
                &self.input.value,
                "0x...",
                self.input.disabled
            ),
            ui::button(
                ButtonVariant::Default,
                self.submit.disabled,
                submit_label
            )
        );

        let results = self
            .panel
            .as_ref()
            .map(ResultPanel::to_html)
            .unwrap_or_default();

        let info = format!(
            r#"<div class="info"><h3>About Irys Network</h3><p>Irys Network is a decentralized data storage network that provides permanent, immutable data storage solutions.</p><a href="{explorer}" target="_blank" rel="noopener noreferrer">Testnet Explorer</a> &bull; <a href="{rpc}" target="_blank" rel="noopener noreferrer">RPC Endpoint</a></div>"#,
            explorer = escape_html(&self.explorer_home),
            rpc = escape_html(&self.rpc_endpoint),
        );

        let card = ui::card(
            "Transaction Count Checker",
            "Enter your EVM wallet address to view your Irys testnet transaction count",
            &format!("{form}{results}{info}"),
        );

        let refresh = if self.auto_refresh {
            r#"<meta http-equiv="refresh" content="1">"#
        } else {
            ""
        };

        format!(
            r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1">{refresh}<title>{TITLE}</title><meta name="description" content="{SUBTITLE}"><style>{STYLESHEET}</style></head><body><main class="container"><div class="hero"><h1>{TITLE}</h1><p>{SUBTITLE}</p></div>{card}</main></body></html>"#
        )
    }
}

const STYLESHEET: &str = "\
body{margin:0;min-height:100vh;font-family:system-ui,sans-serif;background:linear-gradient(135deg,#eff6ff,#e0e7ff);color:#111827}\
.container{max-width:42rem;margin:0 auto;padding:2rem 1rem}\
.hero{text-align:center;margin-bottom:2rem}.hero h1{font-size:2.25rem;margin:0 0 .5rem}.hero p{color:#4b5563;font-size:1.125rem}\
.card{background:#fff;border-radius:.5rem;box-shadow:0 20px 25px -5px rgba(0,0,0,.1)}\
.card-header{background:linear-gradient(90deg,#2563eb,#4f46e5);color:#fff;padding:1.5rem;border-radius:.5rem .5rem 0 0}\
.card-title{margin:0;font-size:1.5rem}.card-description{margin:.25rem 0 0;color:#dbeafe}.card-content{padding:1.5rem}\
.label{display:block;font-size:.875rem;font-weight:500;color:#374151;margin-bottom:.5rem}.row{display:flex;gap:.5rem}\
.input{flex:1;padding:.5rem .75rem;border:1px solid #d1d5db;border-radius:.375rem;font-size:.875rem}.input:disabled{background:#f3f4f6}\
.btn{display:inline-flex;align-items:center;justify-content:center;border-radius:.375rem;font-size:.875rem;font-weight:500;padding:.5rem 1.5rem;cursor:pointer;text-decoration:none;border:0}\
.btn:disabled{opacity:.5;pointer-events:none}.btn-default{background:#2563eb;color:#fff}.btn-outline{background:transparent;border:1px solid #d1d5db;color:#111827}\
.badge{display:inline-block;border-radius:9999px;padding:.25rem .75rem;font-weight:700;background:#c7d2fe;color:#3730a3;font-size:1.125rem}\
.results{margin-top:1.5rem}.alert{display:flex;gap:.75rem;border-radius:.5rem;padding:1rem;border:1px solid}\
.alert-success{background:#f0fdf4;border-color:#bbf7d0;color:#166534}.alert-error{background:#fef2f2;border-color:#fecaca;color:#991b1b}\
.alert-title{font-weight:500}.small{font-size:.875rem;margin-top:.25rem}.count{margin-top:.5rem}.actions{display:flex;gap:.5rem;padding-top:.5rem;margin-top:1rem}.actions form{margin:0}\
.info{margin-top:2rem;padding:1rem;background:#eff6ff;border:1px solid #bfdbfe;border-radius:.5rem;font-size:.875rem}.info h3{margin:0 0 .5rem;color:#1e3a8a}\
.spinner{width:1rem;height:1rem;border:2px solid #fff;border-top-color:transparent;border-radius:50%;animation:spin 1s linear infinite}@keyframes spin{to{transform:rotate(360deg)}}";
