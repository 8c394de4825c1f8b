pub mod cdcms;
