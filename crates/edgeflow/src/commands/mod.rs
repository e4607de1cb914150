pub mod backend;
pub mod certreq;
pub mod credential;
pub mod ipranges;
pub mod site;
pub mod vclconf;
