//! Notification message texts.

use propshop_entity::prop_request::RequestStatus;

/// Placeholder used when a prop can no longer be resolved.
pub const UNKNOWN_PROP: &str = "Unknown Prop";

/// Message sent to the customer who placed an order.
pub fn order_placed_customer(first: &str, line_count: usize) -> String {
    if line_count > 1 {
        format!(
            "Your order for \"{first}\" and {} other prop(s) has been placed successfully. We'll notify you once it is shipped.",
            line_count - 1
        )
    } else {
        format!(
            "Your order for \"{first}\" has been placed successfully. We'll notify you once it is shipped."
        )
    }
}

/// Message sent to every administrator when an order is placed.
pub fn order_placed_admin(first: &str, line_count: usize) -> String {
    if line_count > 1 {
        format!(
            "An order for \"{first}\" and {} other prop(s) has been placed.",
            line_count - 1
        )
    } else {
        format!("An order for prop \"{first}\" has been placed.")
    }
}

/// Message sent to the requester when a prop request is submitted.
pub fn request_submitted_requester(prop_name: &str) -> String {
    format!("Your request for \"{prop_name}\" has been submitted and is awaiting admin approval.")
}

/// Message sent to every administrator when a prop request is submitted.
pub fn request_submitted_admin(prop_name: &str, requester: &str) -> String {
    format!("New prop request: \"{prop_name}\" by {requester}.")
}

/// Message sent to the requester when an admin changes the request status.
pub fn request_status_changed(prop_name: &str, status: RequestStatus) -> String {
    format!("Your request for \"{prop_name}\" has been {status}.")
}
