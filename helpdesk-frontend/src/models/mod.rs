pub mod announcement;
pub mod company;
pub mod member;
pub mod ticket;
pub mod user;
pub mod validation;

pub use announcement::{Announcement, AnnouncementKind, AnnouncementUpdate, NewAnnouncement};
pub use company::{
    ApplicationStatus, Company, CompanyApplication, CompanyApplicationRequest, CompanyOverview,
    CompanySettingsUpdate, CompanyStatus,
};
pub use member::{Member, MemberFilter, MemberStatus, MemberUpdate, NewAgent, NewMember};
pub use ticket::{
    AssignTicketRequest, NewReply, NewTicket, Ticket, TicketFilter, TicketListResponse,
    TicketPriority, TicketReply, TicketSort, TicketStats, TicketStatus,
};
pub use user::{CurrentUser, SessionInfo};
