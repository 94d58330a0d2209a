mod location;
mod sink;

pub use location::{StorageLocation, display_name, local_feed_filename};
pub use sink::{
    ObjectStore, PUBLIC_READ_ACL, PutRequest, RSS_CONTENT_TYPE, S3Store, upload_feed,
    write_feed_file,
};
