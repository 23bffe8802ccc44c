//! The declarative endpoint table.
//!
//! One row per remote operation: dotted access path on the left, descriptor
//! on the right. Access paths and literal URL paths usually coincide but are
//! independent: `settings.get` and `settings.set` both target the literal
//! path `settings`, and the livechat family uses slash-separated URL paths.
//!
//! Result keys name the payload envelope the service wraps each response in
//! (`channel`, `channels`, `messages`, ...); rows without one return the
//! whole decoded object.

use crate::registry::{Endpoint, INFO_API_ROOT};

/// Full endpoint catalogue for the targeted Rocket.Chat REST API version.
pub const CATALOGUE: &[(&str, Endpoint)] = &[
    // ─────────────────────────────────────────────────────────────────────
    // Top-level
    // ─────────────────────────────────────────────────────────────────────
    // Service info is the one endpoint outside /api/v1/ and needs no auth.
    (
        "info",
        Endpoint::get("info")
            .unauthenticated()
            .at_root(INFO_API_ROOT)
            .with_result_key("info"),
    ),
    ("me", Endpoint::get("me")),
    ("directory", Endpoint::get("directory")),
    ("spotlight", Endpoint::get("spotlight")),
    ("statistics", Endpoint::get("statistics")),
    ("statistics.list", Endpoint::get("statistics.list").with_result_key("statistics")),
    ("logout", Endpoint::post("logout").with_result_key("data")),
    // ─────────────────────────────────────────────────────────────────────
    // users.*
    // ─────────────────────────────────────────────────────────────────────
    ("users.create", Endpoint::post("users.create").with_result_key("user")),
    ("users.createToken", Endpoint::post("users.createToken").with_result_key("data")),
    ("users.delete", Endpoint::post("users.delete").with_result_key("success")),
    ("users.forgotPassword", Endpoint::post("users.forgotPassword").unauthenticated()),
    ("users.getAvatar", Endpoint::get("users.getAvatar")),
    ("users.getPresence", Endpoint::get("users.getPresence").with_result_key("presence")),
    (
        "users.getUsernameSuggestion",
        Endpoint::get("users.getUsernameSuggestion").with_result_key("result"),
    ),
    ("users.info", Endpoint::get("users.info").with_result_key("user")),
    ("users.list", Endpoint::get("users.list").with_result_key("users")),
    ("users.register", Endpoint::post("users.register").unauthenticated().with_result_key("user")),
    ("users.resetAvatar", Endpoint::post("users.resetAvatar")),
    ("users.setAvatar", Endpoint::post("users.setAvatar")),
    ("users.setPreferences", Endpoint::post("users.setPreferences")),
    ("users.update", Endpoint::post("users.update").with_result_key("user")),
    // ─────────────────────────────────────────────────────────────────────
    // channels.*
    // ─────────────────────────────────────────────────────────────────────
    ("channels.addAll", Endpoint::post("channels.addAll").with_result_key("channel")),
    ("channels.addLeader", Endpoint::post("channels.addLeader")),
    ("channels.addModerator", Endpoint::post("channels.addModerator")),
    ("channels.addOwner", Endpoint::post("channels.addOwner")),
    ("channels.archive", Endpoint::post("channels.archive")),
    ("channels.cleanHistory", Endpoint::post("channels.cleanHistory")),
    ("channels.close", Endpoint::post("channels.close")),
    ("channels.counters", Endpoint::get("channels.counters")),
    ("channels.create", Endpoint::post("channels.create").with_result_key("channel")),
    ("channels.delete", Endpoint::post("channels.delete")),
    ("channels.files", Endpoint::get("channels.files").with_result_key("files")),
    (
        "channels.getIntegrations",
        Endpoint::get("channels.getIntegrations").with_result_key("integrations"),
    ),
    ("channels.history", Endpoint::get("channels.history").with_result_key("messages")),
    ("channels.info", Endpoint::get("channels.info").with_result_key("channel")),
    ("channels.invite", Endpoint::post("channels.invite").with_result_key("channel")),
    ("channels.kick", Endpoint::post("channels.kick").with_result_key("channel")),
    ("channels.leave", Endpoint::post("channels.leave").with_result_key("channel")),
    ("channels.list", Endpoint::get("channels.list").with_result_key("channels")),
    ("channels.list.joined", Endpoint::get("channels.list.joined").with_result_key("channels")),
    ("channels.members", Endpoint::get("channels.members").with_result_key("members")),
    ("channels.messages", Endpoint::get("channels.messages").with_result_key("messages")),
    ("channels.online", Endpoint::get("channels.online").with_result_key("online")),
    ("channels.open", Endpoint::post("channels.open")),
    ("channels.removeLeader", Endpoint::post("channels.removeLeader")),
    ("channels.removeModerator", Endpoint::post("channels.removeModerator")),
    ("channels.removeOwner", Endpoint::post("channels.removeOwner")),
    ("channels.rename", Endpoint::post("channels.rename").with_result_key("channel")),
    ("channels.roles", Endpoint::get("channels.roles").with_result_key("roles")),
    (
        "channels.setAnnouncement",
        Endpoint::post("channels.setAnnouncement").with_result_key("announcement"),
    ),
    (
        "channels.setCustomFields",
        Endpoint::post("channels.setCustomFields").with_result_key("channel"),
    ),
    ("channels.setDefault", Endpoint::post("channels.setDefault").with_result_key("channel")),
    (
        "channels.setDescription",
        Endpoint::post("channels.setDescription").with_result_key("description"),
    ),
    ("channels.setJoinCode", Endpoint::post("channels.setJoinCode").with_result_key("channel")),
    ("channels.setPurpose", Endpoint::post("channels.setPurpose").with_result_key("purpose")),
    ("channels.setReadOnly", Endpoint::post("channels.setReadOnly").with_result_key("channel")),
    ("channels.setTopic", Endpoint::post("channels.setTopic").with_result_key("topic")),
    ("channels.setType", Endpoint::post("channels.setType").with_result_key("channel")),
    ("channels.unarchive", Endpoint::post("channels.unarchive")),
    // ─────────────────────────────────────────────────────────────────────
    // groups.*
    // ─────────────────────────────────────────────────────────────────────
    ("groups.addLeader", Endpoint::post("groups.addLeader")),
    ("groups.addModerator", Endpoint::post("groups.addModerator")),
    ("groups.addOwner", Endpoint::post("groups.addOwner")),
    ("groups.archive", Endpoint::post("groups.archive")),
    ("groups.close", Endpoint::post("groups.close")),
    ("groups.counters", Endpoint::get("groups.counters")),
    ("groups.create", Endpoint::post("groups.create").with_result_key("group")),
    ("groups.delete", Endpoint::post("groups.delete")),
    ("groups.files", Endpoint::get("groups.files").with_result_key("files")),
    (
        "groups.getIntegrations",
        Endpoint::get("groups.getIntegrations").with_result_key("integrations"),
    ),
    ("groups.history", Endpoint::get("groups.history").with_result_key("messages")),
    ("groups.info", Endpoint::get("groups.info").with_result_key("group")),
    ("groups.invite", Endpoint::post("groups.invite").with_result_key("group")),
    ("groups.kick", Endpoint::post("groups.kick").with_result_key("group")),
    ("groups.leave", Endpoint::post("groups.leave").with_result_key("group")),
    ("groups.list", Endpoint::get("groups.list").with_result_key("groups")),
    ("groups.listAll", Endpoint::get("groups.listAll").with_result_key("groups")),
    ("groups.members", Endpoint::get("groups.members").with_result_key("members")),
    ("groups.messages", Endpoint::get("groups.messages").with_result_key("messages")),
    ("groups.open", Endpoint::post("groups.open")),
    ("groups.removeLeader", Endpoint::post("groups.removeLeader")),
    ("groups.removeModerator", Endpoint::post("groups.removeModerator")),
    ("groups.removeOwner", Endpoint::post("groups.removeOwner")),
    ("groups.rename", Endpoint::post("groups.rename").with_result_key("group")),
    ("groups.roles", Endpoint::get("groups.roles").with_result_key("roles")),
    (
        "groups.setCustomFields",
        Endpoint::post("groups.setCustomFields").with_result_key("group"),
    ),
    (
        "groups.setDescription",
        Endpoint::post("groups.setDescription").with_result_key("description"),
    ),
    ("groups.setPurpose", Endpoint::post("groups.setPurpose").with_result_key("purpose")),
    ("groups.setReadOnly", Endpoint::post("groups.setReadOnly").with_result_key("group")),
    ("groups.setTopic", Endpoint::post("groups.setTopic").with_result_key("topic")),
    ("groups.setType", Endpoint::post("groups.setType").with_result_key("group")),
    ("groups.unarchive", Endpoint::post("groups.unarchive")),
    // ─────────────────────────────────────────────────────────────────────
    // chat.*
    // ─────────────────────────────────────────────────────────────────────
    ("chat.delete", Endpoint::post("chat.delete")),
    ("chat.getMessage", Endpoint::get("chat.getMessage").with_result_key("message")),
    ("chat.ignoreUser", Endpoint::get("chat.ignoreUser")),
    ("chat.pinMessage", Endpoint::post("chat.pinMessage").with_result_key("message")),
    ("chat.postMessage", Endpoint::post("chat.postMessage").with_result_key("message")),
    ("chat.react", Endpoint::post("chat.react")),
    ("chat.reportMessage", Endpoint::post("chat.reportMessage")),
    ("chat.search", Endpoint::get("chat.search").with_result_key("messages")),
    ("chat.starMessage", Endpoint::post("chat.starMessage")),
    ("chat.unPinMessage", Endpoint::post("chat.unPinMessage")),
    ("chat.unStarMessage", Endpoint::post("chat.unStarMessage")),
    ("chat.update", Endpoint::post("chat.update").with_result_key("message")),
    // ─────────────────────────────────────────────────────────────────────
    // im.* and its dm.* aliases (the service accepts either prefix)
    // ─────────────────────────────────────────────────────────────────────
    ("im.close", Endpoint::post("im.close")),
    ("im.counters", Endpoint::get("im.counters")),
    ("im.create", Endpoint::post("im.create").with_result_key("room")),
    ("im.files", Endpoint::get("im.files").with_result_key("files")),
    ("im.history", Endpoint::get("im.history").with_result_key("messages")),
    ("im.list", Endpoint::get("im.list").with_result_key("ims")),
    ("im.list.everyone", Endpoint::get("im.list.everyone").with_result_key("ims")),
    ("im.members", Endpoint::get("im.members").with_result_key("members")),
    ("im.messages", Endpoint::get("im.messages").with_result_key("messages")),
    ("im.messages.others", Endpoint::get("im.messages.others").with_result_key("messages")),
    ("im.open", Endpoint::post("im.open")),
    ("im.setTopic", Endpoint::post("im.setTopic").with_result_key("topic")),
    ("dm.close", Endpoint::post("dm.close")),
    ("dm.counters", Endpoint::get("dm.counters")),
    ("dm.create", Endpoint::post("dm.create").with_result_key("room")),
    ("dm.files", Endpoint::get("dm.files").with_result_key("files")),
    ("dm.history", Endpoint::get("dm.history").with_result_key("messages")),
    ("dm.list", Endpoint::get("dm.list").with_result_key("ims")),
    ("dm.list.everyone", Endpoint::get("dm.list.everyone").with_result_key("ims")),
    ("dm.members", Endpoint::get("dm.members").with_result_key("members")),
    ("dm.messages", Endpoint::get("dm.messages").with_result_key("messages")),
    ("dm.messages.others", Endpoint::get("dm.messages.others").with_result_key("messages")),
    ("dm.open", Endpoint::post("dm.open")),
    ("dm.setTopic", Endpoint::post("dm.setTopic").with_result_key("topic")),
    // ─────────────────────────────────────────────────────────────────────
    // commands.*
    // ─────────────────────────────────────────────────────────────────────
    ("commands.get", Endpoint::get("commands.get").with_result_key("command")),
    ("commands.list", Endpoint::get("commands.list").with_result_key("commands")),
    ("commands.run", Endpoint::post("commands.run")),
    // ─────────────────────────────────────────────────────────────────────
    // settings: one literal path, two verbs, setting id as path argument
    // ─────────────────────────────────────────────────────────────────────
    ("settings.get", Endpoint::get("settings").with_arg()),
    ("settings.set", Endpoint::post("settings").with_arg()),
    // ─────────────────────────────────────────────────────────────────────
    // rooms.*
    // ─────────────────────────────────────────────────────────────────────
    ("rooms.cleanHistory", Endpoint::post("rooms.cleanHistory")),
    ("rooms.favorite", Endpoint::post("rooms.favorite")),
    ("rooms.get", Endpoint::get("rooms.get")),
    ("rooms.info", Endpoint::get("rooms.info").with_result_key("room")),
    ("rooms.leave", Endpoint::post("rooms.leave")),
    ("rooms.saveNotification", Endpoint::post("rooms.saveNotification")),
    ("rooms.upload", Endpoint::post("rooms.upload").with_arg().with_result_key("message")),
    // ─────────────────────────────────────────────────────────────────────
    // roles.*
    // ─────────────────────────────────────────────────────────────────────
    ("roles.addUserToRole", Endpoint::post("roles.addUserToRole").with_result_key("role")),
    ("roles.create", Endpoint::post("roles.create").with_result_key("role")),
    ("roles.list", Endpoint::get("roles.list").with_result_key("roles")),
    // ─────────────────────────────────────────────────────────────────────
    // permissions.*
    // ─────────────────────────────────────────────────────────────────────
    ("permissions.list", Endpoint::get("permissions.list").with_result_key("permissions")),
    ("permissions.update", Endpoint::post("permissions.update").with_result_key("permissions")),
    // ─────────────────────────────────────────────────────────────────────
    // integrations.*
    // ─────────────────────────────────────────────────────────────────────
    (
        "integrations.create",
        Endpoint::post("integrations.create").with_result_key("integration"),
    ),
    ("integrations.history", Endpoint::get("integrations.history").with_result_key("history")),
    ("integrations.list", Endpoint::get("integrations.list").with_result_key("integrations")),
    (
        "integrations.remove",
        Endpoint::post("integrations.remove").with_result_key("integration"),
    ),
    // ─────────────────────────────────────────────────────────────────────
    // livechat.* (literal paths are slash-separated on this family)
    // ─────────────────────────────────────────────────────────────────────
    (
        "livechat.department.list",
        Endpoint::get("livechat/department").with_result_key("departments"),
    ),
    (
        "livechat.department.create",
        Endpoint::post("livechat/department").with_result_key("department"),
    ),
    (
        "livechat.department.get",
        Endpoint::get("livechat/department").with_arg().with_result_key("department"),
    ),
    ("livechat.department.remove", Endpoint::delete("livechat/department").with_arg()),
    ("livechat.users", Endpoint::get("livechat/users").with_arg().with_result_key("users")),
    (
        "livechat.inquiries.list",
        Endpoint::get("livechat/inquiries.list").with_result_key("inquiries"),
    ),
    (
        "livechat.inquiries.take",
        Endpoint::post("livechat/inquiries.take").with_result_key("inquiry"),
    ),
    ("livechat.rooms", Endpoint::get("livechat/rooms").with_result_key("rooms")),
    (
        "livechat.visitor.create",
        Endpoint::post("livechat/visitor").with_result_key("visitor"),
    ),
    (
        "livechat.visitor.get",
        Endpoint::get("livechat/visitor").with_arg().with_result_key("visitor"),
    ),
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::registry::{Method, Registry, DEFAULT_API_ROOT};

    #[test]
    fn test_access_paths_are_unique() {
        let mut seen = HashSet::new();
        for (access_path, _) in CATALOGUE {
            assert!(seen.insert(access_path), "duplicate row: {access_path}");
        }
    }

    #[test]
    fn test_every_row_resolves_to_its_descriptor() {
        let registry = Registry::new(CATALOGUE);
        for (access_path, endpoint) in CATALOGUE {
            let resolved = registry.resolve(access_path).unwrap();
            assert_eq!(resolved, endpoint, "mismatch at {access_path}");
        }
    }

    #[test]
    fn test_family_roots_are_namespaces() {
        let registry = Registry::new(CATALOGUE);
        for root in [
            "users",
            "channels",
            "groups",
            "chat",
            "im",
            "dm",
            "commands",
            "settings",
            "rooms",
            "roles",
            "permissions",
            "integrations",
            "livechat",
        ] {
            let endpoint = registry.resolve(root).unwrap();
            assert!(!endpoint.is_callable(), "{root} should be namespace-only");
        }
    }

    #[test]
    fn test_only_info_leaves_the_default_root() {
        for (access_path, endpoint) in CATALOGUE {
            if *access_path == "info" {
                assert_eq!(endpoint.api_root, INFO_API_ROOT);
            } else {
                assert_eq!(endpoint.api_root, DEFAULT_API_ROOT, "at {access_path}");
            }
        }
    }

    #[test]
    fn test_settings_rows_share_one_literal_path() {
        let registry = Registry::new(CATALOGUE);
        let get = registry.resolve("settings.get").unwrap();
        let set = registry.resolve("settings.set").unwrap();
        assert_eq!(get.path, "settings");
        assert_eq!(set.path, "settings");
        assert_eq!(get.method, Some(Method::Get));
        assert_eq!(set.method, Some(Method::Post));
        assert!(get.arg_endpoint && set.arg_endpoint);
    }

    #[test]
    fn test_dm_rows_mirror_im_rows() {
        let registry = Registry::new(CATALOGUE);
        for (access_path, endpoint) in CATALOGUE {
            let Some(suffix) = access_path.strip_prefix("im.") else {
                continue;
            };
            let alias = format!("dm.{suffix}");
            let dm = registry.resolve(&alias).unwrap();
            assert_eq!(dm.method, endpoint.method, "at {alias}");
            assert_eq!(dm.result_key, endpoint.result_key, "at {alias}");
            assert_eq!(dm.path, endpoint.path.replacen("im.", "dm.", 1), "at {alias}");
        }
    }

    #[test]
    fn test_callable_and_parent_rows_coexist() {
        let registry = Registry::new(CATALOGUE);
        for (parent, child) in [
            ("channels.list", "channels.list.joined"),
            ("im.list", "im.list.everyone"),
            ("im.messages", "im.messages.others"),
            ("statistics", "statistics.list"),
        ] {
            assert!(registry.resolve(parent).unwrap().is_callable());
            assert!(registry.resolve(child).unwrap().is_callable());
        }
    }
}
