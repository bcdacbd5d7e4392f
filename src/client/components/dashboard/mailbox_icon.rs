use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{
    FaBell, FaBoxArchive, FaBriefcase, FaClock, FaEnvelope, FaInbox, FaMessage, FaPenToSquare,
    FaStar, FaTag, FaTrash, FaUser, FaUsers,
};
use dioxus_free_icons::Icon;

use crate::model::email::MailboxIcon;

#[component]
pub fn MailboxIconView(icon: MailboxIcon, size: Option<u32>) -> Element {
    let size = size.unwrap_or(16);

    match icon {
        MailboxIcon::Inbox => rsx!(Icon { width: size, height: size, icon: FaInbox }),
        MailboxIcon::Star => rsx!(Icon { width: size, height: size, icon: FaStar }),
        MailboxIcon::Clock => rsx!(Icon { width: size, height: size, icon: FaClock }),
        MailboxIcon::FileEdit => rsx!(Icon { width: size, height: size, icon: FaPenToSquare }),
        MailboxIcon::Archive => rsx!(Icon { width: size, height: size, icon: FaBoxArchive }),
        MailboxIcon::Trash => rsx!(Icon { width: size, height: size, icon: FaTrash }),
        MailboxIcon::Briefcase => rsx!(Icon { width: size, height: size, icon: FaBriefcase }),
        MailboxIcon::User => rsx!(Icon { width: size, height: size, icon: FaUser }),
        MailboxIcon::Mail => rsx!(Icon { width: size, height: size, icon: FaEnvelope }),
        MailboxIcon::Users => rsx!(Icon { width: size, height: size, icon: FaUsers }),
        MailboxIcon::Tag => rsx!(Icon { width: size, height: size, icon: FaTag }),
        MailboxIcon::Bell => rsx!(Icon { width: size, height: size, icon: FaBell }),
        MailboxIcon::MessageSquare => rsx!(Icon { width: size, height: size, icon: FaMessage }),
    }
}
