pub mod alert_record;
