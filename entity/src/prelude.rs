pub use super::channel::Entity as Channel;
pub use super::checklist_item::Entity as ChecklistItem;
pub use super::coach_call::Entity as CoachCall;
pub use super::coupon::Entity as Coupon;
pub use super::event::Entity as Event;
pub use super::event_rsvp::Entity as EventRsvp;
pub use super::membership::Entity as Membership;
pub use super::membership_tier::Entity as MembershipTier;
pub use super::personalized_program::Entity as PersonalizedProgram;
pub use super::post::Entity as Post;
pub use super::program::Entity as Program;
pub use super::questionnaire::Entity as Questionnaire;
pub use super::questionnaire_response::Entity as QuestionnaireResponse;
pub use super::ticket::Entity as Ticket;
pub use super::user::Entity as User;
pub use super::video::Entity as Video;
