//! Path templates of the admin REST API.
//!
//! Templates are relative to the server URL. Placeholders in braces are filled
//! by [`fill`] with percent-encoded values.

#![allow(missing_docs)]

use kc_core::{Error, Result};

pub const URL_SERVER_INFO: &str = "admin/serverinfo";

pub const URL_ADMIN_REALMS: &str = "admin/realms";
pub const URL_ADMIN_REALM: &str = "admin/realms/{realm-name}";
pub const URL_ADMIN_REALM_PARTIAL_IMPORT: &str = "admin/realms/{realm-name}/partialImport";
pub const URL_ADMIN_REALM_PARTIAL_EXPORT: &str = "admin/realms/{realm-name}/partial-export";
pub const URL_ADMIN_EVENTS: &str = "admin/realms/{realm-name}/events";
pub const URL_ADMIN_ADMIN_EVENTS: &str = "admin/realms/{realm-name}/admin-events";

pub const URL_ADMIN_USERS: &str = "admin/realms/{realm-name}/users";
pub const URL_ADMIN_USERS_COUNT: &str = "admin/realms/{realm-name}/users/count";
pub const URL_ADMIN_USER: &str = "admin/realms/{realm-name}/users/{id}";
pub const URL_ADMIN_USER_RESET_PASSWORD: &str = "admin/realms/{realm-name}/users/{id}/reset-password";
pub const URL_ADMIN_USER_GROUPS: &str = "admin/realms/{realm-name}/users/{id}/groups";
pub const URL_ADMIN_USER_GROUP: &str = "admin/realms/{realm-name}/users/{id}/groups/{group-id}";
pub const URL_ADMIN_USER_LOGOUT: &str = "admin/realms/{realm-name}/users/{id}/logout";
pub const URL_ADMIN_USER_CONSENTS: &str = "admin/realms/{realm-name}/users/{id}/consents";
pub const URL_ADMIN_USER_SESSIONS: &str = "admin/realms/{realm-name}/users/{id}/sessions";
pub const URL_ADMIN_USER_CREDENTIALS: &str = "admin/realms/{realm-name}/users/{id}/credentials";
pub const URL_ADMIN_USER_CREDENTIAL: &str =
    "admin/realms/{realm-name}/users/{id}/credentials/{credential-id}";
pub const URL_ADMIN_SEND_VERIFY_EMAIL: &str = "admin/realms/{realm-name}/users/{id}/send-verify-email";
pub const URL_ADMIN_SEND_UPDATE_ACCOUNT: &str =
    "admin/realms/{realm-name}/users/{id}/execute-actions-email";
pub const URL_ADMIN_USER_REALM_ROLES: &str = "admin/realms/{realm-name}/users/{id}/role-mappings/realm";
pub const URL_ADMIN_USER_REALM_ROLES_COMPOSITE: &str =
    "admin/realms/{realm-name}/users/{id}/role-mappings/realm/composite";
pub const URL_ADMIN_USER_CLIENT_ROLES: &str =
    "admin/realms/{realm-name}/users/{id}/role-mappings/clients/{client-id}";

pub const URL_ADMIN_GROUPS: &str = "admin/realms/{realm-name}/groups";
pub const URL_ADMIN_GROUPS_COUNT: &str = "admin/realms/{realm-name}/groups/count";
pub const URL_ADMIN_GROUP: &str = "admin/realms/{realm-name}/groups/{id}";
pub const URL_ADMIN_GROUP_CHILDREN: &str = "admin/realms/{realm-name}/groups/{id}/children";
pub const URL_ADMIN_GROUP_MEMBERS: &str = "admin/realms/{realm-name}/groups/{id}/members";
pub const URL_ADMIN_GROUP_PERMISSIONS: &str =
    "admin/realms/{realm-name}/groups/{id}/management/permissions";

pub const URL_ADMIN_CLIENTS: &str = "admin/realms/{realm-name}/clients";
pub const URL_ADMIN_CLIENT: &str = "admin/realms/{realm-name}/clients/{id}";
pub const URL_ADMIN_CLIENT_SECRETS: &str = "admin/realms/{realm-name}/clients/{id}/client-secret";
pub const URL_ADMIN_CLIENT_SERVICE_ACCOUNT_USER: &str =
    "admin/realms/{realm-name}/clients/{id}/service-account-user";
pub const URL_ADMIN_CLIENT_INSTALLATION_PROVIDER: &str =
    "admin/realms/{realm-name}/clients/{id}/installation/providers/{provider-id}";

pub const URL_ADMIN_REALM_ROLES: &str = "admin/realms/{realm-name}/roles";
pub const URL_ADMIN_REALM_ROLE: &str = "admin/realms/{realm-name}/roles/{role-name}";
pub const URL_ADMIN_REALM_ROLE_MEMBERS: &str = "admin/realms/{realm-name}/roles/{role-name}/users";
pub const URL_ADMIN_CLIENT_ROLES: &str = "admin/realms/{realm-name}/clients/{id}/roles";
pub const URL_ADMIN_CLIENT_ROLE: &str = "admin/realms/{realm-name}/clients/{id}/roles/{role-name}";

pub const URL_ADMIN_CLIENT_SCOPES: &str = "admin/realms/{realm-name}/client-scopes";
pub const URL_ADMIN_CLIENT_SCOPE: &str = "admin/realms/{realm-name}/client-scopes/{scope-id}";

pub const URL_ADMIN_IDPS: &str = "admin/realms/{realm-name}/identity-provider/instances";
pub const URL_ADMIN_IDP: &str = "admin/realms/{realm-name}/identity-provider/instances/{alias}";
pub const URL_ADMIN_IDP_MAPPERS: &str =
    "admin/realms/{realm-name}/identity-provider/instances/{alias}/mappers";

pub const URL_ADMIN_FLOWS: &str = "admin/realms/{realm-name}/authentication/flows";
pub const URL_ADMIN_FLOW: &str = "admin/realms/{realm-name}/authentication/flows/{id}";
pub const URL_ADMIN_FLOW_COPY: &str = "admin/realms/{realm-name}/authentication/flows/{flow-alias}/copy";
pub const URL_ADMIN_FLOW_EXECUTIONS: &str =
    "admin/realms/{realm-name}/authentication/flows/{flow-alias}/executions";
pub const URL_ADMIN_FLOW_EXECUTION: &str =
    "admin/realms/{realm-name}/authentication/flows/{flow-alias}/executions/execution";
pub const URL_ADMIN_FLOW_SUBFLOW: &str =
    "admin/realms/{realm-name}/authentication/flows/{flow-alias}/executions/flow";
pub const URL_ADMIN_REQUIRED_ACTIONS: &str = "admin/realms/{realm-name}/authentication/required-actions";
pub const URL_ADMIN_REQUIRED_ACTION: &str =
    "admin/realms/{realm-name}/authentication/required-actions/{action-alias}";

pub const URL_ADMIN_CLIENT_AUTHZ_SETTINGS: &str =
    "admin/realms/{realm-name}/clients/{id}/authz/resource-server/settings";
pub const URL_ADMIN_CLIENT_AUTHZ_RESOURCES: &str =
    "admin/realms/{realm-name}/clients/{id}/authz/resource-server/resource";
pub const URL_ADMIN_CLIENT_AUTHZ_RESOURCE: &str =
    "admin/realms/{realm-name}/clients/{id}/authz/resource-server/resource/{resource-id}";
pub const URL_ADMIN_CLIENT_AUTHZ_SCOPES: &str =
    "admin/realms/{realm-name}/clients/{id}/authz/resource-server/scope";
pub const URL_ADMIN_CLIENT_AUTHZ_POLICIES: &str =
    "admin/realms/{realm-name}/clients/{id}/authz/resource-server/policy";
pub const URL_ADMIN_CLIENT_AUTHZ_POLICY: &str =
    "admin/realms/{realm-name}/clients/{id}/authz/resource-server/policy/{policy-id}";
pub const URL_ADMIN_CLIENT_AUTHZ_ROLE_BASED_POLICY: &str =
    "admin/realms/{realm-name}/clients/{id}/authz/resource-server/policy/role";
pub const URL_ADMIN_CLIENT_AUTHZ_PERMISSIONS: &str =
    "admin/realms/{realm-name}/clients/{id}/authz/resource-server/permission";
pub const URL_ADMIN_CLIENT_AUTHZ_RESOURCE_BASED_PERMISSION: &str =
    "admin/realms/{realm-name}/clients/{id}/authz/resource-server/permission/resource";

/// Fills every `{placeholder}` of `template` from `params`.
///
/// Values are percent-encoded as single path segments. A placeholder with no
/// matching parameter is a configuration error, as is an empty, `.` or `..`
/// value: those would resolve to a different endpoint.
pub fn fill(template: &str, params: &[(&str, &str)]) -> Result<String> {
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let end = rest[start..]
            .find('}')
            .map(|offset| start + offset)
            .ok_or_else(|| Error::configuration(format!("unterminated placeholder in {template}")))?;
        let key = &rest[start + 1..end];
        let value = params
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| *value)
            .ok_or_else(|| {
                Error::configuration(format!("missing path parameter {key} for {template}"))
            })?;
        if matches!(value, "" | "." | "..") {
            return Err(Error::configuration(format!(
                "path parameter {key} must name a single resource, got {value:?}"
            )));
        }
        out.push_str(&rest[..start]);
        out.push_str(&urlencoding::encode(value));
        rest = &rest[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}
